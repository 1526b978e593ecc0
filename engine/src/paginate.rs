//! Pagination and table splitting for the consolidated layout
//!
//! Consolidated groups flow into at most two tables by first-fit in
//! discovery order: groups accumulate into table 1 while the running row
//! count stays within the page's row budget, and everything after the first
//! overflow spills into table 2. A group is never split across the boundary.

use crate::config::{PageConfig, TableConfig};
use crate::dimensions::{compute_dimensions, TableDimensions};
use crate::group::ConsolidatedGroup;
use crate::matrix::build_matrix;

/// One table's groups plus its computed dimensions
#[derive(Debug, Clone)]
pub struct TableSet {
    pub groups: Vec<ConsolidatedGroup>,
    pub dims: TableDimensions,
}

/// Layout plan for one consolidated report
#[derive(Debug, Clone, Default)]
pub struct ConsolidatedPlan {
    pub table1: Option<TableSet>,
    pub table2: Option<TableSet>,
    /// Render both tables in two columns on the same page
    pub side_by_side: bool,
}

/// Grid rows that fit on one page, computed once per page template
pub fn max_rows_per_table(page: &PageConfig, table: &TableConfig) -> i64 {
    let available =
        page.height - table.header_height - table.footer_height - 2.0 * page.margin;
    (available / table.row_height).floor() as i64 - 2
}

/// First-fit, order-preserving assignment into exactly two bins
///
/// Each group weighs `1 + distinct colors` rows. Once a group would push
/// table 1 past `max_rows`, it and every later group go to table 2.
pub fn partition_groups(
    groups: Vec<ConsolidatedGroup>,
    max_rows: i64,
) -> (Vec<ConsolidatedGroup>, Vec<ConsolidatedGroup>) {
    let mut table1 = Vec::new();
    let mut table2 = Vec::new();
    let mut rows_used: i64 = 0;

    for group in groups {
        let rows = group.row_count() as i64;
        if table2.is_empty() && rows_used + rows <= max_rows {
            rows_used += rows;
            table1.push(group);
        } else {
            table2.push(group);
        }
    }

    (table1, table2)
}

/// Sizes with stock anywhere in a bin, in numeric-aware order
fn bin_sizes(groups: &[ConsolidatedGroup]) -> Vec<String> {
    let variants: Vec<_> = groups
        .iter()
        .flat_map(|group| group.variants.iter().cloned())
        .collect();
    build_matrix(&variants, true).sizes
}

fn table_set(
    groups: Vec<ConsolidatedGroup>,
    page: &PageConfig,
    table: &TableConfig,
) -> Option<TableSet> {
    if groups.is_empty() {
        return None;
    }
    let dims = compute_dimensions(page, table, bin_sizes(&groups))?;
    Some(TableSet { groups, dims })
}

/// Plan the consolidated layout: partition, dimension each table, and
/// decide between the two-column and the sequential arrangement
pub fn plan_consolidated(
    groups: Vec<ConsolidatedGroup>,
    page: &PageConfig,
    table: &TableConfig,
) -> ConsolidatedPlan {
    let budget = max_rows_per_table(page, table);
    let (bin1, bin2) = partition_groups(groups, budget);

    tracing::debug!(
        table1_groups = bin1.len(),
        table2_groups = bin2.len(),
        row_budget = budget,
        "partitioned consolidated groups"
    );

    let table1 = table_set(bin1, page, table);
    let table2 = table_set(bin2, page, table);

    let available = (page.width - 2.0 * page.margin).max(0.0);
    let side_by_side = match (&table1, &table2) {
        (Some(first), Some(second)) => {
            first.dims.table_width + second.dims.table_width + table.table_gutter <= available
        }
        _ => false,
    };

    ConsolidatedPlan {
        table1,
        table2,
        side_by_side,
    }
}
