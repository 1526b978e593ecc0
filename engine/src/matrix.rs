//! Size/color quantity matrix
//!
//! For a set of grouped variants, derives the ordered size axis and a
//! color -> size -> cartons lookup. Quantities from multiple records at the
//! same (color, size) accumulate; they are never overwritten.

use std::collections::HashMap;

use shared::StockRecord;

use crate::normalize::{color_key, size_key};

/// One color's accumulated quantities per size
#[derive(Debug, Clone)]
pub struct ColorRow {
    pub color: String,
    cells: HashMap<String, u32>,
}

impl ColorRow {
    /// Accumulated cartons for a size, if any record touched the cell
    pub fn quantity(&self, size: &str) -> Option<u32> {
        self.cells.get(size).copied()
    }
}

/// Quantity lookup keyed by color then size
#[derive(Debug, Clone)]
pub struct SizeColorMatrix {
    /// Size axis in numeric-aware order
    pub sizes: Vec<String>,
    /// Color rows in discovery order
    pub rows: Vec<ColorRow>,
}

impl SizeColorMatrix {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Accumulated cartons across all colors for one size
    pub fn size_total(&self, size: &str) -> u32 {
        self.rows
            .iter()
            .filter_map(|row| row.quantity(size))
            .sum()
    }
}

/// Sort key for size labels: `<digits>["X"<digits>]` anywhere in the label
/// maps to `first * 100 + second`; labels without digits sort to zero.
/// Ties keep discovery order (the sort is stable).
pub fn size_sort_key(size: &str) -> i64 {
    let bytes = size.as_bytes();

    let mut start = 0;
    while start < bytes.len() && !bytes[start].is_ascii_digit() {
        start += 1;
    }
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if start == end {
        return 0;
    }
    let first: i64 = size[start..end].parse().unwrap_or(0);

    let mut second: i64 = 0;
    if end < bytes.len() && (bytes[end] == b'X' || bytes[end] == b'x') {
        let tail_start = end + 1;
        let mut tail_end = tail_start;
        while tail_end < bytes.len() && bytes[tail_end].is_ascii_digit() {
            tail_end += 1;
        }
        if tail_end > tail_start {
            second = size[tail_start..tail_end].parse().unwrap_or(0);
        }
    }

    first * 100 + second
}

/// Build the size/color matrix for a set of variants
///
/// With `only_in_stock`, sizes whose accumulated cartons are zero across all
/// colors are dropped from the axis; a zero cell under a size kept via
/// another color still renders as a dash.
pub fn build_matrix(variants: &[StockRecord], only_in_stock: bool) -> SizeColorMatrix {
    let mut sizes: Vec<String> = Vec::new();
    let mut size_totals: HashMap<String, u32> = HashMap::new();
    let mut rows: Vec<ColorRow> = Vec::new();
    let mut row_index: HashMap<String, usize> = HashMap::new();

    for variant in variants {
        let color = color_key(&variant.color);
        let slot = match row_index.get(&color) {
            Some(&slot) => slot,
            None => {
                row_index.insert(color.clone(), rows.len());
                rows.push(ColorRow {
                    color,
                    cells: HashMap::new(),
                });
                rows.len() - 1
            }
        };

        let Some(size) = size_key(&variant.size) else {
            continue;
        };
        if !size_totals.contains_key(&size) {
            sizes.push(size.clone());
        }
        *size_totals.entry(size.clone()).or_insert(0) += variant.cartons;
        *rows[slot].cells.entry(size).or_insert(0) += variant.cartons;
    }

    if only_in_stock {
        sizes.retain(|size| size_totals.get(size).copied().unwrap_or(0) > 0);
    }
    sizes.sort_by_key(|size| size_sort_key(size));

    SizeColorMatrix { sizes, rows }
}
