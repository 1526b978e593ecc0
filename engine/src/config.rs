//! Configuration management for the stock report engine
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code (the tuned A4 layout)
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with STOCK_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main engine configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Page geometry
    #[serde(default)]
    pub page: PageConfig,

    /// Consolidated-table layout metrics
    #[serde(default)]
    pub table: TableConfig,

    /// Illustrated-page layout metrics
    #[serde(default)]
    pub illustrated: IllustratedConfig,

    /// Article consolidation rules
    #[serde(default)]
    pub consolidation: ConsolidationConfig,
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            page: PageConfig::default(),
            table: TableConfig::default(),
            illustrated: IllustratedConfig::default(),
            consolidation: ConsolidationConfig::default(),
        }
    }
}

/// Page geometry in PDF points
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PageConfig {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        // A4 portrait
        Self {
            width: 595.0,
            height: 842.0,
            margin: 15.0,
        }
    }
}

/// Metrics for the consolidated (image-free) table layout
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TableConfig {
    pub row_height: f64,
    /// Vertical space reserved for the document header
    pub header_height: f64,
    /// Vertical space reserved at the bottom of each page
    pub footer_height: f64,
    /// Fixed width of the article/color label column
    pub article_width: f64,
    pub min_size_width: f64,
    pub max_size_width: f64,
    /// Horizontal gap between side-by-side tables
    pub table_gutter: f64,
    /// Minimum vertical footprint required to start table 2 on the current page
    pub min_table_space: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_height: 12.0,
            header_height: 80.0,
            footer_height: 20.0,
            article_width: 100.0,
            min_size_width: 18.0,
            max_size_width: 35.0,
            table_gutter: 20.0,
            min_table_space: 100.0,
        }
    }
}

/// Metrics for the illustrated one-article-per-page layout
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IllustratedConfig {
    pub row_height: f64,
    /// Width of the color label column
    pub color_width: f64,
    pub size_width: f64,
    /// Height of the tinted block when the product image resolves
    pub image_block_height: f64,
    /// Collapsed block height when no image is available
    pub empty_block_height: f64,
    /// Fit box for the product image
    pub image_width: f64,
    pub image_height: f64,
    /// Vertical space the image area claims above the grid
    pub image_reserved: f64,
    pub block_padding: f64,
}

impl Default for IllustratedConfig {
    fn default() -> Self {
        Self {
            row_height: 25.0,
            color_width: 120.0,
            size_width: 80.0,
            image_block_height: 370.0,
            empty_block_height: 140.0,
            image_width: 200.0,
            image_height: 180.0,
            image_reserved: 220.0,
            block_padding: 20.0,
        }
    }
}

/// Article consolidation rules
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ConsolidationConfig {
    /// Category tokens stripped (with a `-` or `_` separator) from the end
    /// of article keys when merging visually-equivalent groups. Checked in
    /// order, repeatedly, until none matches.
    pub suffixes: Vec<String>,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            suffixes: [
                "GENTS",
                "LADIES",
                "KIDS_MALE",
                "KIDS_FEMALE",
                "MENS",
                "WOMENS",
                "BOYS",
                "GIRLS",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("STOCK_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            .set_default("environment", environment.clone())?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (STOCK_ prefix)
            .add_source(
                Environment::with_prefix("STOCK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Printable width between the page margins
    pub fn printable_width(&self) -> f64 {
        (self.page.width - 2.0 * self.page.margin).max(0.0)
    }
}
