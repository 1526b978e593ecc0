//! Dynamic table dimension calculation
//!
//! Column widths derive from the page geometry and the size-set cardinality
//! alone; the engine never measures glyphs. Size columns stay within the
//! configured [min, max] band so they remain legible however many sizes a
//! partition carries, and the reported table width never exceeds the
//! printable area.

use crate::config::{PageConfig, TableConfig};

/// Computed widths for one consolidated table
#[derive(Debug, Clone, PartialEq)]
pub struct TableDimensions {
    pub table_width: f64,
    pub article_width: f64,
    pub size_width: f64,
    /// Size axis of the partition this table renders
    pub sizes: Vec<String>,
}

/// Compute table dimensions for a partition's size axis
///
/// Returns `None` for an empty size set; the caller skips such partitions
/// silently.
pub fn compute_dimensions(
    page: &PageConfig,
    table: &TableConfig,
    sizes: Vec<String>,
) -> Option<TableDimensions> {
    if sizes.is_empty() {
        return None;
    }

    let available = (page.width - 2.0 * page.margin).max(0.0);
    let raw = ((available - table.article_width) / sizes.len() as f64).floor();
    let size_width = raw.min(table.max_size_width).max(table.min_size_width);
    let table_width = (table.article_width + size_width * sizes.len() as f64).min(available);

    Some(TableDimensions {
        table_width,
        article_width: table.article_width,
        size_width,
        sizes,
    })
}
