//! Report request models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Presentation mode of a stock report
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    /// Dense image-free matrix packing many articles per page
    Consolidated,
    /// One article per page with a product image above the stock grid
    Illustrated,
}

/// Per-request report options
///
/// `generated_at` is injected by the caller so that report generation stays
/// a pure computation; the engine never reads the clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    pub mode: ReportMode,
    /// Print the dealer rate line on illustrated pages
    #[serde(default)]
    pub show_rate: bool,
    /// Print the MRP line on illustrated pages
    #[serde(default)]
    pub show_mrp: bool,
    pub company_name: String,
    pub report_title: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportOptions {
    pub fn new(mode: ReportMode, generated_at: DateTime<Utc>) -> Self {
        Self {
            mode,
            show_rate: false,
            show_mrp: false,
            company_name: "GPFAX PVT. LTD.".to_string(),
            report_title: "Stock Statement".to_string(),
            generated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(
            serde_json::to_string(&ReportMode::Consolidated).unwrap(),
            r#""consolidated""#
        );
        let mode: ReportMode = serde_json::from_str(r#""illustrated""#).unwrap();
        assert_eq!(mode, ReportMode::Illustrated);
    }

    #[test]
    fn test_options_defaults() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let options = ReportOptions::new(ReportMode::Consolidated, at);
        assert!(!options.show_rate);
        assert!(!options.show_mrp);
        assert_eq!(options.report_title, "Stock Statement");
    }
}
