//! Walks a computed layout and emits ordered drawing calls
//!
//! Grid lines are derived from the same dimensions used for text placement,
//! so borders and cell text cannot drift apart. Draw state (current Y, page
//! count, tables on the current page) lives in an explicit cursor threaded
//! through the renderer, never in module state.

use rust_decimal::Decimal;
use shared::{ReportOptions, StockRecord};

use crate::config::Config;
use crate::dimensions::TableDimensions;
use crate::error::ReportResult;
use crate::group::ArticleGroup;
use crate::image::ImageResolver;
use crate::matrix::{build_matrix, ColorRow, SizeColorMatrix};
use crate::paginate::{ConsolidatedPlan, TableSet};
use crate::surface::{Align, DrawSurface, TextStyle};

const HEADER_FILL: &str = "#e8e8e8";
const ARTICLE_ROW_FILL: &str = "#f5f5f5";
const DATA_ROW_FILL: &str = "#ffffff";
const GRID_STROKE: &str = "#333";
const IMAGE_BLOCK_FILL: &str = "#D7F6F8";
const ILLUSTRATED_HEADER_FILL: &str = "#f0f0f0";
const ALTERNATE_ROW_FILL: &str = "#f9f9f9";

/// Draw-state cursor threaded through the pagination walk
#[derive(Debug, Clone, Copy)]
pub struct LayoutCursor {
    pub y: f64,
    pub page: usize,
    /// Tables already drawn on the current page; resets on every page break
    pub tables_on_page: usize,
}

/// Emits one report onto a drawing surface
pub struct ReportRenderer<'a, S: DrawSurface> {
    surface: &'a mut S,
    config: &'a Config,
    options: &'a ReportOptions,
    cursor: LayoutCursor,
}

impl<'a, S: DrawSurface> ReportRenderer<'a, S> {
    pub fn new(surface: &'a mut S, config: &'a Config, options: &'a ReportOptions) -> Self {
        let cursor = LayoutCursor {
            y: config.page.margin,
            page: 1,
            tables_on_page: 0,
        };
        Self {
            surface,
            config,
            options,
            cursor,
        }
    }

    /// Pages emitted so far
    pub fn pages(&self) -> usize {
        self.cursor.page
    }

    // ------------------------------------------------------------------
    // Consolidated mode
    // ------------------------------------------------------------------

    /// Render the consolidated report described by `plan`
    pub fn render_consolidated(&mut self, plan: &ConsolidatedPlan) -> ReportResult<()> {
        self.cursor.y = self.draw_document_header()?;
        let margin = self.config.page.margin;

        let Some(table1) = &plan.table1 else {
            if let Some(table2) = &plan.table2 {
                self.render_table_set(table2, margin)?;
            }
            return Ok(());
        };

        let first_top = self.cursor.y;
        self.render_table_set(table1, margin)?;

        if let Some(table2) = &plan.table2 {
            if plan.side_by_side {
                let x2 = margin + table1.dims.table_width + self.config.table.table_gutter;
                self.cursor.y = first_top;
                self.render_table_set(table2, x2)?;
            } else {
                let bottom = self.config.page.height - self.config.table.footer_height;
                if self.cursor.y + self.config.table.min_table_space > bottom {
                    self.start_new_page()?;
                }
                self.render_table_set(table2, margin)?;
            }
        }
        Ok(())
    }

    /// Header lines drawn at the top of every consolidated page; returns the
    /// Y where table content may start
    fn draw_document_header(&mut self) -> ReportResult<f64> {
        let margin = self.config.page.margin;
        let width = self.config.printable_width();
        let mut y = margin;

        self.surface.draw_text(
            &self.options.company_name,
            margin,
            y,
            &TextStyle::new(width, Align::Center, 12.0, true),
        )?;
        y += 18.0;
        self.surface.draw_text(
            &self.options.report_title,
            margin,
            y,
            &TextStyle::new(width, Align::Center, 10.0, true),
        )?;
        y += 14.0;
        let stamp = self.options.generated_at.format("%d/%m/%Y %H:%M:%S");
        self.surface.draw_text(
            &format!("Date-Time: {}", stamp),
            margin,
            y,
            &TextStyle::new(width, Align::Left, 8.0, false),
        )?;
        y += 16.0;
        Ok(y)
    }

    fn start_new_page(&mut self) -> ReportResult<()> {
        self.surface.new_page()?;
        self.cursor.page += 1;
        self.cursor.tables_on_page = 0;
        self.cursor.y = self.draw_document_header()?;
        Ok(())
    }

    /// Draw one table (header, group rows, derived grid) at column `x`
    ///
    /// Before drawing, the conservative footprint estimate is checked
    /// against the space left on the page; a table that does not fit defers
    /// to a fresh page unless it would be the first table on this page.
    fn render_table_set(&mut self, set: &TableSet, x: f64) -> ReportResult<()> {
        let table = &self.config.table;
        let required = (set.groups.len() as f64 * 2.0 + 1.0) * table.row_height;
        let remaining = self.config.page.height - self.cursor.y - table.footer_height;
        if remaining < required && self.cursor.tables_on_page > 0 {
            self.start_new_page()?;
        }

        let top = self.cursor.y;
        let mut y = self.draw_table_header(x, top, &set.dims)?;
        for group in &set.groups {
            let matrix = build_matrix(&group.variants, false);
            y = self.draw_table_row(x, y, &group.cleaned_article, None, true, &set.dims)?;
            for row in &matrix.rows {
                y = self.draw_table_row(x, y, &row.color, Some(row), false, &set.dims)?;
            }
        }
        self.draw_table_grid(x, top, y, &set.dims)?;

        self.cursor.y = y;
        self.cursor.tables_on_page += 1;
        Ok(())
    }

    fn draw_table_header(&mut self, x: f64, y: f64, dims: &TableDimensions) -> ReportResult<f64> {
        let row_height = self.config.table.row_height;
        self.surface.draw_rect(
            x,
            y,
            dims.table_width,
            row_height,
            Some(HEADER_FILL),
            Some(GRID_STROKE),
        )?;
        self.surface.draw_text(
            "ART",
            x + 3.0,
            y + 4.0,
            &TextStyle::new(dims.article_width - 6.0, Align::Left, 8.0, true),
        )?;
        for (index, size) in dims.sizes.iter().enumerate() {
            let cell_x = x + dims.article_width + index as f64 * dims.size_width;
            let label = size.replace('X', "x");
            let font_size = if label.chars().count() > 4 { 6.0 } else { 7.0 };
            self.surface.draw_text(
                &label,
                cell_x + 1.0,
                y + 4.0,
                &TextStyle::new(dims.size_width - 2.0, Align::Center, font_size, true),
            )?;
        }
        Ok(y + row_height)
    }

    fn draw_table_row(
        &mut self,
        x: f64,
        y: f64,
        label: &str,
        row: Option<&ColorRow>,
        is_article_row: bool,
        dims: &TableDimensions,
    ) -> ReportResult<f64> {
        let row_height = self.config.table.row_height;
        let fill = if is_article_row {
            ARTICLE_ROW_FILL
        } else {
            DATA_ROW_FILL
        };
        self.surface
            .draw_rect(x, y, dims.table_width, row_height, Some(fill), None)?;

        let font_size = if is_article_row { 8.0 } else { 7.0 };
        self.surface.draw_text(
            &truncate_label(label, 25, 22),
            x + 3.0,
            y + 3.0,
            &TextStyle::new(
                dims.article_width - 6.0,
                Align::Left,
                font_size,
                is_article_row,
            ),
        )?;

        if let Some(row) = row {
            for (index, size) in dims.sizes.iter().enumerate() {
                let value = cell_text(row.quantity(size));
                let cell_x = x + dims.article_width + index as f64 * dims.size_width;
                let font_size = if value.chars().count() > 3 { 6.0 } else { 7.0 };
                self.surface.draw_text(
                    &value,
                    cell_x + 1.0,
                    y + 3.0,
                    &TextStyle::new(dims.size_width - 2.0, Align::Center, font_size, false),
                )?;
            }
        }
        Ok(y + row_height)
    }

    /// Stroke the grid for a finished table from the same dimensions the
    /// rows were placed with
    fn draw_table_grid(
        &mut self,
        x: f64,
        top: f64,
        bottom: f64,
        dims: &TableDimensions,
    ) -> ReportResult<()> {
        self.surface
            .draw_rect(x, top, dims.table_width, bottom - top, None, Some(GRID_STROKE))?;

        let article_rule = x + dims.article_width;
        self.surface.draw_line(article_rule, top, article_rule, bottom)?;
        for index in 1..dims.sizes.len() {
            let rule_x = x + dims.article_width + index as f64 * dims.size_width;
            self.surface.draw_line(rule_x, top, rule_x, bottom)?;
        }

        let row_height = self.config.table.row_height;
        let mut rule_y = top + row_height;
        while rule_y < bottom - 0.01 {
            self.surface.draw_line(x, rule_y, x + dims.table_width, rule_y)?;
            rule_y += row_height;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Illustrated mode
    // ------------------------------------------------------------------

    /// Render one page per article group, unconditionally
    pub fn render_illustrated(
        &mut self,
        groups: &[ArticleGroup],
        images: &dyn ImageResolver,
    ) -> ReportResult<()> {
        for (index, group) in groups.iter().enumerate() {
            if index > 0 {
                self.surface.new_page()?;
                self.cursor.page += 1;
            }
            self.render_illustrated_page(group, images)?;
        }
        Ok(())
    }

    fn render_illustrated_page(
        &mut self,
        group: &ArticleGroup,
        images: &dyn ImageResolver,
    ) -> ReportResult<()> {
        let margin = self.config.page.margin;
        let width = self.config.printable_width();
        let half = width / 2.0;
        let illustrated = &self.config.illustrated;
        let mut y = margin;

        self.surface.draw_text(
            &self.options.company_name,
            margin,
            y,
            &TextStyle::new(width, Align::Center, 16.0, true),
        )?;
        y += 22.0;
        self.surface.draw_text(
            &self.options.report_title,
            margin,
            y,
            &TextStyle::new(width, Align::Center, 14.0, true),
        )?;
        y += 20.0;

        let stamp = self.options.generated_at.format("%d/%m/%Y %H:%M:%S");
        let date_only = self.options.generated_at.format("%d/%m/%Y");
        self.surface.draw_text(
            &format!("Date-Time: {}", stamp),
            margin,
            y,
            &TextStyle::new(half, Align::Left, 10.0, false),
        )?;
        self.surface.draw_text(
            &format!("As On Date: {}", date_only),
            margin + half,
            y,
            &TextStyle::new(half, Align::Right, 10.0, false),
        )?;
        y += 16.0;

        self.surface.draw_text(
            &format!("Stock Type: {}", text_or_dash(&group.stock_type)),
            margin,
            y,
            &TextStyle::new(half, Align::Left, 10.0, false),
        )?;
        self.surface.draw_text(
            &format!("Series: {}", text_or_dash(&group.series)),
            margin + half,
            y,
            &TextStyle::new(half, Align::Right, 10.0, false),
        )?;
        y += 20.0;

        self.surface.draw_text(
            &format!("ART.: {}", group.article),
            margin,
            y,
            &TextStyle::new(width, Align::Left, 12.0, true),
        )?;
        y += 16.0;
        if self.options.show_rate {
            self.surface.draw_text(
                &format!("Rate: {} /-", price_label(&group.rate)),
                margin,
                y,
                &TextStyle::new(width, Align::Left, 12.0, true),
            )?;
            y += 14.0;
        }
        if self.options.show_mrp {
            self.surface.draw_text(
                &format!("MRP: {} /-", price_label(&group.mrp)),
                margin,
                y,
                &TextStyle::new(width, Align::Left, 12.0, true),
            )?;
            y += 14.0;
        }
        y += 6.0;
        self.surface.draw_text(
            &format!("Pair/Crtn: {}", count_label(group.pair_per_carton)),
            margin,
            y,
            &TextStyle::new(width, Align::Left, 10.0, false),
        )?;
        y += 18.0;

        // Tinted block; collapses when the image reference does not resolve
        let image = group.image_ref.as_deref().and_then(|r| images.resolve(r));
        if image.is_none() && group.image_ref.is_some() {
            tracing::debug!(article = %group.article, "image missing, using no-image layout");
        }
        let block_height = if image.is_some() {
            illustrated.image_block_height
        } else {
            illustrated.empty_block_height
        };
        let block_top = y;
        self.surface
            .draw_rect(margin, block_top, width, block_height, Some(IMAGE_BLOCK_FILL), None)?;
        if let Some(bytes) = &image {
            let image_x = margin + (width - illustrated.image_width) / 2.0;
            self.surface.place_image(
                bytes,
                image_x,
                block_top + illustrated.block_padding,
                illustrated.image_width,
                illustrated.image_height,
            )?;
        }

        let grid_top = if image.is_some() {
            block_top + illustrated.image_reserved
        } else {
            block_top + illustrated.block_padding
        };
        let stocked: Vec<StockRecord> = group
            .variants
            .iter()
            .filter(|variant| variant.in_stock())
            .cloned()
            .collect();
        let matrix = build_matrix(&stocked, true);
        self.draw_illustrated_grid(margin, grid_top, &matrix)?;
        Ok(())
    }

    /// Per-color/size stock grid beneath the image block
    fn draw_illustrated_grid(
        &mut self,
        x: f64,
        top: f64,
        matrix: &SizeColorMatrix,
    ) -> ReportResult<f64> {
        let illustrated = &self.config.illustrated;
        let row_height = illustrated.row_height;
        let table_width =
            illustrated.color_width + matrix.sizes.len() as f64 * illustrated.size_width;
        let mut y = top;

        self.surface
            .draw_rect(x, y, table_width, row_height, Some(ILLUSTRATED_HEADER_FILL), None)?;
        self.surface.draw_text(
            "Color",
            x + 5.0,
            y + 8.0,
            &TextStyle::new(illustrated.color_width - 10.0, Align::Left, 10.0, true),
        )?;
        for (index, size) in matrix.sizes.iter().enumerate() {
            let cell_x = x + illustrated.color_width + index as f64 * illustrated.size_width;
            self.surface.draw_text(
                size,
                cell_x + 5.0,
                y + 8.0,
                &TextStyle::new(illustrated.size_width - 10.0, Align::Center, 10.0, true),
            )?;
        }
        y += row_height;

        if matrix.is_empty() {
            // Out of stock entirely: one placeholder row, nothing to count
            self.surface.draw_text(
                "-",
                x + 5.0,
                y + 8.0,
                &TextStyle::new(illustrated.color_width - 10.0, Align::Left, 9.0, false),
            )?;
            y += row_height;
        } else {
            for (row_index, row) in matrix.rows.iter().enumerate() {
                if row_index % 2 == 0 {
                    self.surface.draw_rect(
                        x,
                        y,
                        table_width,
                        row_height,
                        Some(ALTERNATE_ROW_FILL),
                        None,
                    )?;
                }
                self.surface.draw_text(
                    &row.color,
                    x + 5.0,
                    y + 8.0,
                    &TextStyle::new(illustrated.color_width - 10.0, Align::Left, 9.0, false),
                )?;
                for (index, size) in matrix.sizes.iter().enumerate() {
                    let value = cell_text(row.quantity(size));
                    let cell_x =
                        x + illustrated.color_width + index as f64 * illustrated.size_width;
                    self.surface.draw_text(
                        &value,
                        cell_x + 5.0,
                        y + 8.0,
                        &TextStyle::new(illustrated.size_width - 10.0, Align::Center, 9.0, false),
                    )?;
                }
                y += row_height;
            }
        }

        self.surface
            .draw_rect(x, top, table_width, y - top, None, Some(GRID_STROKE))?;
        let color_rule = x + illustrated.color_width;
        self.surface.draw_line(color_rule, top, color_rule, y)?;
        for index in 1..matrix.sizes.len() {
            let rule_x = x + illustrated.color_width + index as f64 * illustrated.size_width;
            self.surface.draw_line(rule_x, top, rule_x, y)?;
        }
        let mut rule_y = top + row_height;
        while rule_y < y - 0.01 {
            self.surface.draw_line(x, rule_y, x + table_width, rule_y)?;
            rule_y += row_height;
        }
        Ok(y)
    }

    // ------------------------------------------------------------------
    // Empty documents
    // ------------------------------------------------------------------

    /// Zero records still produce a valid document with its header
    pub fn render_empty(&mut self) -> ReportResult<()> {
        self.cursor.y = self.draw_document_header()?;
        Ok(())
    }
}

/// Cell text for an accumulated quantity; zero and absent both render a dash
fn cell_text(quantity: Option<u32>) -> String {
    match quantity {
        Some(q) if q > 0 => q.to_string(),
        _ => "-".to_string(),
    }
}

/// Labels longer than `max` chars truncate to `keep` chars plus an ellipsis
fn truncate_label(label: &str, max: usize, keep: usize) -> String {
    if label.chars().count() > max {
        let head: String = label.chars().take(keep).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}

fn price_label(value: &Decimal) -> String {
    if value.is_zero() {
        "-".to_string()
    } else {
        value.normalize().to_string()
    }
}

fn count_label(value: u32) -> String {
    if value == 0 {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn text_or_dash(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "-"
    } else {
        trimmed
    }
}
