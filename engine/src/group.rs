//! Grouping and consolidation of stock records
//!
//! Records group by (article, gender); visually-equivalent article groups
//! then merge under their suffix-cleaned name. Both phases preserve
//! discovery order, so a fixed input order always produces the same output.

use std::collections::HashMap;

use shared::{Gender, StockRecord};

use crate::normalize::{article_key, clean_article, color_key};

/// Records sharing the same article and gender
///
/// Presentation fields are captured from the group's first record; the image
/// reference is the first non-empty one found among the variants.
#[derive(Debug, Clone)]
pub struct ArticleGroup {
    pub key: String,
    pub article: String,
    pub gender: Gender,
    pub stock_type: String,
    pub series: String,
    pub mrp: rust_decimal::Decimal,
    pub rate: rust_decimal::Decimal,
    pub pair_per_carton: u32,
    pub image_ref: Option<String>,
    pub variants: Vec<StockRecord>,
}

/// Article groups merged under a suffix-cleaned name
#[derive(Debug, Clone)]
pub struct ConsolidatedGroup {
    pub cleaned_article: String,
    pub image_ref: Option<String>,
    pub variants: Vec<StockRecord>,
}

impl ConsolidatedGroup {
    /// Rows this group consumes in a consolidated table: one header row
    /// plus one row per distinct color
    pub fn row_count(&self) -> usize {
        1 + self.distinct_colors()
    }

    pub fn distinct_colors(&self) -> usize {
        let mut seen: Vec<String> = Vec::new();
        for variant in &self.variants {
            let color = color_key(&variant.color);
            if !seen.contains(&color) {
                seen.push(color);
            }
        }
        seen.len()
    }
}

/// Group records by (article, gender), preserving discovery order
pub fn group_records(records: &[StockRecord]) -> Vec<ArticleGroup> {
    let mut groups: Vec<ArticleGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = article_key(&record.article, record.gender);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(ArticleGroup {
                    key,
                    article: record.article.trim().to_string(),
                    gender: record.gender,
                    stock_type: record.stock_type.trim().to_string(),
                    series: record.series.trim().to_string(),
                    mrp: record.mrp,
                    rate: record.rate,
                    pair_per_carton: record.pair_per_carton,
                    image_ref: None,
                    variants: Vec::new(),
                });
                groups.len() - 1
            }
        };

        let group = &mut groups[slot];
        if group.image_ref.is_none() {
            if let Some(image) = record.image_ref.as_deref() {
                if !image.trim().is_empty() {
                    group.image_ref = Some(image.to_string());
                }
            }
        }
        group.variants.push(record.clone());
    }

    groups
}

/// Merge article groups whose suffix-cleaned names collide
///
/// Variant sequences concatenate in discovery order; the merged image
/// reference is the first non-empty one encountered and is never overwritten.
pub fn consolidate(groups: Vec<ArticleGroup>, suffixes: &[String]) -> Vec<ConsolidatedGroup> {
    let mut merged: Vec<ConsolidatedGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for group in groups {
        let cleaned = clean_article(&group.key, suffixes);
        let slot = match index.get(&cleaned) {
            Some(&slot) => slot,
            None => {
                index.insert(cleaned.clone(), merged.len());
                merged.push(ConsolidatedGroup {
                    cleaned_article: cleaned,
                    image_ref: None,
                    variants: Vec::new(),
                });
                merged.len() - 1
            }
        };

        let target = &mut merged[slot];
        if target.image_ref.is_none() {
            target.image_ref = group.image_ref;
        }
        target.variants.extend(group.variants);
    }

    merged
}
