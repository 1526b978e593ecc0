//! Report generation entry point
//!
//! One request builds its groups and matrices from scratch, so concurrent
//! generations never interfere; the engine is side-effect-free until the
//! instruction stream reaches the drawing surface.

use shared::{ReportMode, ReportOptions, StockRecord};

use crate::config::Config;
use crate::error::ReportResult;
use crate::group::{consolidate, group_records};
use crate::image::ImageResolver;
use crate::paginate::plan_consolidated;
use crate::render::ReportRenderer;
use crate::surface::DrawSurface;

/// Counts describing a generated report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub pages: usize,
    pub article_groups: usize,
    pub consolidated_groups: usize,
}

/// Stock report layout engine
#[derive(Clone)]
pub struct StockReportEngine {
    config: Config,
}

impl StockReportEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate one report onto `surface`
    ///
    /// Consolidated mode groups, consolidates and paginates; illustrated
    /// mode renders one page per raw (article, gender) group and bypasses
    /// the pagination engine entirely.
    pub fn generate<S, R>(
        &self,
        records: &[StockRecord],
        options: &ReportOptions,
        surface: &mut S,
        images: &R,
    ) -> ReportResult<ReportSummary>
    where
        S: DrawSurface,
        R: ImageResolver,
    {
        let groups = group_records(records);
        tracing::debug!(
            records = records.len(),
            groups = groups.len(),
            mode = ?options.mode,
            "generating stock report"
        );

        let article_groups = groups.len();
        let mut renderer = ReportRenderer::new(surface, &self.config, options);
        let mut consolidated_groups = 0;

        if groups.is_empty() {
            renderer.render_empty()?;
        } else {
            match options.mode {
                ReportMode::Consolidated => {
                    let merged =
                        consolidate(groups, &self.config.consolidation.suffixes);
                    consolidated_groups = merged.len();
                    let plan =
                        plan_consolidated(merged, &self.config.page, &self.config.table);
                    renderer.render_consolidated(&plan)?;
                }
                ReportMode::Illustrated => {
                    renderer.render_illustrated(&groups, images)?;
                }
            }
        }

        let summary = ReportSummary {
            pages: renderer.pages(),
            article_groups,
            consolidated_groups,
        };
        tracing::info!(
            pages = summary.pages,
            article_groups = summary.article_groups,
            "stock report generated"
        );
        Ok(summary)
    }
}
