//! Stock Report - Command Line Generator
//!
//! Reads a JSON array of stock records, runs the layout engine, and prints
//! the resulting drawing-instruction stream as JSON on stdout. Storage,
//! transport and rasterization stay outside; this binary is one possible
//! caller of the engine.

use std::path::PathBuf;

use chrono::Utc;
use shared::{ReportMode, ReportOptions, StockRecord};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stock_report_engine::image::{DirectoryResolver, NoImages};
use stock_report_engine::{Config, RecordingSurface, StockReportEngine};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stock_report=info,stock_report_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting stock report generator");
    tracing::info!("Environment: {}", config.environment);

    let args = parse_args()?;

    let raw = std::fs::read_to_string(&args.records)?;
    let records: Vec<StockRecord> = serde_json::from_str(&raw)?;
    tracing::info!("Loaded {} records from {}", records.len(), args.records.display());

    let mut options = ReportOptions::new(args.mode, Utc::now());
    options.show_rate = args.show_rate;
    options.show_mrp = args.show_mrp;

    let engine = StockReportEngine::new(config);
    let mut surface = RecordingSurface::new();

    let summary = if args.image_roots.is_empty() {
        engine.generate(&records, &options, &mut surface, &NoImages)?
    } else {
        let resolver = DirectoryResolver::new(args.image_roots);
        engine.generate(&records, &options, &mut surface, &resolver)?
    };

    tracing::info!(
        "Generated {} pages from {} article groups",
        summary.pages,
        summary.article_groups
    );

    println!("{}", serde_json::to_string_pretty(surface.ops())?);
    Ok(())
}

struct Args {
    records: PathBuf,
    mode: ReportMode,
    show_rate: bool,
    show_mrp: bool,
    image_roots: Vec<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut records: Option<PathBuf> = None;
    let mut mode = ReportMode::Consolidated;
    let mut show_rate = false;
    let mut show_mrp = false;
    let mut image_roots: Vec<PathBuf> = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--illustrated" => mode = ReportMode::Illustrated,
            "--show-rate" => show_rate = true,
            "--show-mrp" => show_mrp = true,
            "--images" => {
                let root = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--images requires a directory"))?;
                image_roots.push(PathBuf::from(root));
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if records.is_none() && !other.starts_with('-') => {
                records = Some(PathBuf::from(other));
            }
            other => anyhow::bail!("unknown argument: {}", other),
        }
    }

    let records = records.ok_or_else(|| {
        print_usage();
        anyhow::anyhow!("missing records file")
    })?;

    Ok(Args {
        records,
        mode,
        show_rate,
        show_mrp,
        image_roots,
    })
}

fn print_usage() {
    eprintln!(
        "Usage: stock-report <records.json> [--illustrated] [--show-rate] [--show-mrp] [--images <dir>]..."
    );
}
