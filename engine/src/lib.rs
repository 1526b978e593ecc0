//! Stock Report Layout Engine
//!
//! Turns a flat collection of stock-keeping records into a paginated,
//! tabular document expressed as an ordered stream of drawing instructions.
//! Two presentation modes are supported: a dense consolidated matrix packing
//! many articles per page, and a one-article-per-page illustrated layout
//! with a size/color grid beneath a product image. Rasterization, record
//! storage and transport are the caller's concern.

pub mod config;
pub mod dimensions;
pub mod error;
pub mod group;
pub mod image;
pub mod matrix;
pub mod normalize;
pub mod paginate;
pub mod render;
pub mod report;
pub mod surface;

pub use config::Config;
pub use error::{ReportError, ReportResult};
pub use report::{ReportSummary, StockReportEngine};
pub use surface::{DrawOp, DrawSurface, RecordingSurface};
