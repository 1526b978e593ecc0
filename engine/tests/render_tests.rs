//! End-to-end rendering tests over a recording surface
//!
//! Each scenario runs the full engine and asserts on the ordered
//! drawing-instruction stream instead of rasterized output.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use shared::{Gender, ReportMode, ReportOptions, StockRecord};

use stock_report_engine::config::{Config, PageConfig};
use stock_report_engine::image::{ImageResolver, NoImages};
use stock_report_engine::surface::{DrawOp, RecordingSurface};
use stock_report_engine::StockReportEngine;

fn record(article: &str, gender: Gender, color: &str, size: &str, cartons: u32) -> StockRecord {
    StockRecord {
        article: article.to_string(),
        gender,
        stock_type: "FRESH".to_string(),
        color: color.to_string(),
        size: size.to_string(),
        cartons,
        pair_per_carton: 12,
        mrp: Decimal::from(499),
        rate: Decimal::from(299),
        series: "S1".to_string(),
        image_ref: None,
    }
}

fn options(mode: ReportMode) -> ReportOptions {
    let at = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
    ReportOptions::new(mode, at)
}

fn engine() -> StockReportEngine {
    StockReportEngine::new(Config::default())
}

/// Resolver that always produces an image payload
struct StaticImages;

impl ImageResolver for StaticImages {
    fn resolve(&self, _image_ref: &str) -> Option<Vec<u8>> {
        Some(vec![0u8; 16])
    }
}

fn new_page_count(surface: &RecordingSurface) -> usize {
    surface
        .ops()
        .iter()
        .filter(|op| matches!(op, DrawOp::NewPage))
        .count()
}

/// X positions of consolidated table-header rects, in draw order
fn header_rect_xs(surface: &RecordingSurface) -> Vec<f64> {
    surface
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Rect {
                x,
                fill: Some(fill),
                ..
            } if fill == "#e8e8e8" => Some(*x),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Consolidated mode
// ============================================================================

#[test]
fn test_empty_input_still_emits_a_document() {
    let mut surface = RecordingSurface::new();
    let summary = engine()
        .generate(&[], &options(ReportMode::Consolidated), &mut surface, &NoImages)
        .unwrap();

    assert_eq!(summary.pages, 1);
    assert_eq!(summary.article_groups, 0);

    let texts: Vec<&str> = surface.texts().collect();
    assert_eq!(
        texts,
        vec![
            "GPFAX PVT. LTD.",
            "Stock Statement",
            "Date-Time: 15/01/2025 10:30:00",
        ]
    );
    assert_eq!(new_page_count(&surface), 0);
}

#[test]
fn test_consolidated_renders_groups_and_cells() {
    let records = vec![
        record("A1", Gender::Gents, "RED", "8", 2),
        record("A1", Gender::Gents, "RED", "8", 3),
        record("A1", Gender::Gents, "BLUE", "9", 1),
    ];
    let mut surface = RecordingSurface::new();
    let summary = engine()
        .generate(
            &records,
            &options(ReportMode::Consolidated),
            &mut surface,
            &NoImages,
        )
        .unwrap();

    assert_eq!(summary.article_groups, 1);
    assert_eq!(summary.consolidated_groups, 1);

    let texts: Vec<&str> = surface.texts().collect();
    assert!(texts.contains(&"ART"));
    assert!(texts.contains(&"A1"));
    assert!(texts.contains(&"RED"));
    assert!(texts.contains(&"BLUE"));
    // Accumulated cell for (RED, 8)
    assert!(texts.contains(&"5"));
    // BLUE has no stock in size 8, so its row carries a dash
    assert!(texts.contains(&"-"));
}

#[test]
fn test_suffixed_articles_consolidate_to_one_row_group() {
    let records = vec![
        record("SHOE-GENTS", Gender::Gents, "RED", "8", 2),
        record("SHOE-LADIES", Gender::Ladies, "PINK", "6", 1),
    ];
    let mut surface = RecordingSurface::new();
    let summary = engine()
        .generate(
            &records,
            &options(ReportMode::Consolidated),
            &mut surface,
            &NoImages,
        )
        .unwrap();

    assert_eq!(summary.article_groups, 2);
    assert_eq!(summary.consolidated_groups, 1);
    assert_eq!(surface.texts().filter(|text| *text == "SHOE").count(), 1);
}

#[test]
fn test_two_narrow_tables_share_a_page() {
    // 20 two-color groups overflow a 57-row budget into a second table;
    // both tables are one size wide and render side by side
    let records: Vec<StockRecord> = (0..20)
        .flat_map(|index| {
            let article = format!("ART{}", index);
            vec![
                record(&article, Gender::Gents, "RED", "8", 1),
                record(&article, Gender::Gents, "BLUE", "8", 1),
            ]
        })
        .collect();
    let mut surface = RecordingSurface::new();
    let summary = engine()
        .generate(
            &records,
            &options(ReportMode::Consolidated),
            &mut surface,
            &NoImages,
        )
        .unwrap();

    assert_eq!(summary.pages, 1);
    assert_eq!(new_page_count(&surface), 0);

    // Both table headers sit on the same page: column 1 at the margin,
    // column 2 one table width plus the gutter to the right
    let headers = header_rect_xs(&surface);
    assert_eq!(headers, vec![15.0, 15.0 + 135.0 + 20.0]);
}

#[test]
fn test_wide_second_table_starts_a_new_page() {
    // 15 distinct sizes per bin force the sequential arrangement, and
    // table 1 leaves too little room for table 2 on the first page
    let records: Vec<StockRecord> = (0..20)
        .flat_map(|index| {
            let article = format!("ART{}", index);
            let size = format!("{}", (index % 15) + 1);
            vec![
                record(&article, Gender::Gents, "RED", &size, 1),
                record(&article, Gender::Gents, "BLUE", &size, 1),
            ]
        })
        .collect();
    let mut surface = RecordingSurface::new();
    let summary = engine()
        .generate(
            &records,
            &options(ReportMode::Consolidated),
            &mut surface,
            &NoImages,
        )
        .unwrap();

    assert_eq!(summary.pages, 2);
    assert_eq!(new_page_count(&surface), 1);

    // The document header is redrawn on the second page
    let company_lines = surface
        .texts()
        .filter(|text| *text == "GPFAX PVT. LTD.")
        .count();
    assert_eq!(company_lines, 2);
}

#[test]
fn test_degenerate_geometry_terminates() {
    // A page too small for even one column must still produce a bounded
    // instruction stream instead of looping or crashing
    let config = Config {
        page: PageConfig {
            width: 50.0,
            height: 60.0,
            margin: 15.0,
        },
        ..Config::default()
    };
    let records = vec![
        record("A1", Gender::Gents, "RED", "8", 2),
        record("A2", Gender::Gents, "BLUE", "9", 1),
    ];
    let mut surface = RecordingSurface::new();
    let summary = StockReportEngine::new(config)
        .generate(
            &records,
            &options(ReportMode::Consolidated),
            &mut surface,
            &NoImages,
        )
        .unwrap();

    assert!(summary.pages >= 1);
    assert!(!surface.ops().is_empty());
}

// ============================================================================
// Illustrated mode
// ============================================================================

#[test]
fn test_illustrated_one_page_per_group() {
    let records = vec![
        record("A1", Gender::Gents, "RED", "8", 2),
        record("A2", Gender::Gents, "BLUE", "9", 1),
        record("A3", Gender::Ladies, "GREEN", "7", 4),
    ];
    let mut surface = RecordingSurface::new();
    let summary = engine()
        .generate(
            &records,
            &options(ReportMode::Illustrated),
            &mut surface,
            &NoImages,
        )
        .unwrap();

    assert_eq!(summary.pages, 3);
    assert_eq!(new_page_count(&surface), 2);
}

#[test]
fn test_illustrated_resolved_image_reserves_full_block() {
    let mut with_ref = record("A1", Gender::Gents, "RED", "8", 2);
    with_ref.image_ref = Some("a1.png".to_string());

    let mut surface = RecordingSurface::new();
    engine()
        .generate(
            &[with_ref],
            &options(ReportMode::Illustrated),
            &mut surface,
            &StaticImages,
        )
        .unwrap();

    let image_ops: Vec<&DrawOp> = surface
        .ops()
        .iter()
        .filter(|op| matches!(op, DrawOp::Image { .. }))
        .collect();
    assert_eq!(image_ops.len(), 1);
    if let DrawOp::Image {
        fit_width,
        fit_height,
        byte_len,
        ..
    } = image_ops[0]
    {
        assert_eq!(*fit_width, 200.0);
        assert_eq!(*fit_height, 180.0);
        assert_eq!(*byte_len, 16);
    }

    let block_heights: Vec<f64> = surface
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Rect {
                height,
                fill: Some(fill),
                ..
            } if fill == "#D7F6F8" => Some(*height),
            _ => None,
        })
        .collect();
    assert_eq!(block_heights, vec![370.0]);
}

#[test]
fn test_illustrated_unresolved_image_collapses_block() {
    let mut with_ref = record("A1", Gender::Gents, "RED", "8", 2);
    with_ref.image_ref = Some("missing.png".to_string());

    let mut surface = RecordingSurface::new();
    engine()
        .generate(
            &[with_ref],
            &options(ReportMode::Illustrated),
            &mut surface,
            &NoImages,
        )
        .unwrap();

    assert!(!surface
        .ops()
        .iter()
        .any(|op| matches!(op, DrawOp::Image { .. })));

    let block_heights: Vec<f64> = surface
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Rect {
                height,
                fill: Some(fill),
                ..
            } if fill == "#D7F6F8" => Some(*height),
            _ => None,
        })
        .collect();
    assert_eq!(block_heights, vec![140.0]);
}

#[test]
fn test_illustrated_zero_stock_renders_placeholder_row() {
    let records = vec![
        record("A1", Gender::Gents, "RED", "8", 0),
        record("A1", Gender::Gents, "BLUE", "9", 0),
    ];
    let mut surface = RecordingSurface::new();
    let summary = engine()
        .generate(
            &records,
            &options(ReportMode::Illustrated),
            &mut surface,
            &NoImages,
        )
        .unwrap();

    assert_eq!(summary.pages, 1);

    let texts: Vec<&str> = surface.texts().collect();
    assert!(texts.contains(&"Color"));
    assert!(texts.contains(&"-"));
    // No size labels survive the in-stock filter
    assert!(!texts.contains(&"8"));
    assert!(!texts.contains(&"9"));
    // Out-of-stock colors get no rows either
    assert!(!texts.contains(&"RED"));
    assert!(!texts.contains(&"BLUE"));
}

#[test]
fn test_illustrated_price_lines_follow_options() {
    let mut options = options(ReportMode::Illustrated);
    options.show_rate = true;
    options.show_mrp = true;

    let records = vec![record("A1", Gender::Gents, "RED", "8", 2)];
    let mut surface = RecordingSurface::new();
    engine()
        .generate(&records, &options, &mut surface, &NoImages)
        .unwrap();

    let texts: Vec<&str> = surface.texts().collect();
    assert!(texts.contains(&"ART.: A1"));
    assert!(texts.contains(&"Rate: 299 /-"));
    assert!(texts.contains(&"MRP: 499 /-"));
    assert!(texts.contains(&"Pair/Crtn: 12"));
    assert!(texts.contains(&"Stock Type: FRESH"));
    assert!(texts.contains(&"Series: S1"));
}

#[test]
fn test_illustrated_hides_price_lines_by_default() {
    let records = vec![record("A1", Gender::Gents, "RED", "8", 2)];
    let mut surface = RecordingSurface::new();
    engine()
        .generate(
            &records,
            &options(ReportMode::Illustrated),
            &mut surface,
            &NoImages,
        )
        .unwrap();

    assert!(!surface.texts().any(|text| text.starts_with("Rate:")));
    assert!(!surface.texts().any(|text| text.starts_with("MRP:")));
}
