//! Stock record models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single stock-keeping record: one (article, color, size) position
///
/// Records are immutable inputs owned by the caller; the engine never
/// mutates them. Missing string fields deserialize to empty strings and are
/// normalized to safe defaults during grouping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRecord {
    pub article: String,
    pub gender: Gender,
    #[serde(default)]
    pub stock_type: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub size: String,
    /// Cartons currently in stock for this position
    #[serde(default)]
    pub cartons: u32,
    #[serde(default)]
    pub pair_per_carton: u32,
    #[serde(default)]
    pub mrp: Decimal,
    #[serde(default)]
    pub rate: Decimal,
    #[serde(default)]
    pub series: String,
    /// Reference into the caller's image store (file name or relative path)
    #[serde(default)]
    pub image_ref: Option<String>,
}

impl StockRecord {
    /// Total pairs held at this position
    pub fn total_pairs(&self) -> u64 {
        u64::from(self.cartons) * u64::from(self.pair_per_carton)
    }

    /// Whether this position has any stock at all
    pub fn in_stock(&self) -> bool {
        self.cartons > 0
    }
}

/// Target audience of an article
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Gents,
    Ladies,
    KidsMale,
    KidsFemale,
}

impl Gender {
    /// Upper-case token used when building grouping keys
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Gents => "GENTS",
            Gender::Ladies => "LADIES",
            Gender::KidsMale => "KIDS_MALE",
            Gender::KidsFemale => "KIDS_FEMALE",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
