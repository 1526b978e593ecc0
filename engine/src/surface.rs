//! Generic drawing surface consumed by the layout engine
//!
//! The engine emits an ordered stream of drawing calls and never queries the
//! surface for measured text widths; all sizing is computed analytically
//! from the configured geometry. Rasterization and font metrics belong to
//! the surface implementation.

use serde::Serialize;

use crate::error::ReportResult;

/// Horizontal text alignment within the given cell width
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Text placement options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Width of the box the text is laid out in
    pub width: f64,
    pub align: Align,
    pub font_size: f64,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(width: f64, align: Align, font_size: f64, bold: bool) -> Self {
        Self {
            width,
            align,
            font_size,
            bold,
        }
    }
}

/// Drawing surface capability
///
/// Calls arrive in strict layout order. Implementations that cannot honor a
/// call should fail with `ReportError::Surface` rather than silently skip.
pub trait DrawSurface {
    fn draw_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<&str>,
        stroke: Option<&str>,
    ) -> ReportResult<()>;

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> ReportResult<()>;

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> ReportResult<()>;

    fn place_image(
        &mut self,
        data: &[u8],
        x: f64,
        y: f64,
        fit_width: f64,
        fit_height: f64,
    ) -> ReportResult<()>;

    fn new_page(&mut self) -> ReportResult<()>;
}

/// One recorded drawing instruction
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum DrawOp {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<String>,
        stroke: Option<String>,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        width: f64,
        align: Align,
        font_size: f64,
        bold: bool,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Image {
        x: f64,
        y: f64,
        fit_width: f64,
        fit_height: f64,
        /// Payload size; the bytes themselves stay with the caller
        byte_len: usize,
    },
    NewPage,
}

/// Surface that records the instruction stream instead of rasterizing it
///
/// Used by the CLI to emit a serializable report and by tests to assert on
/// layout decisions.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// Pages in the recorded document (a document always has one open page)
    pub fn page_count(&self) -> usize {
        1 + self
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::NewPage))
            .count()
    }

    /// Recorded text runs, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn draw_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<&str>,
        stroke: Option<&str>,
    ) -> ReportResult<()> {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill: fill.map(str::to_string),
            stroke: stroke.map(str::to_string),
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> ReportResult<()> {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            width: style.width,
            align: style.align,
            font_size: style.font_size,
            bold: style.bold,
        });
        Ok(())
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> ReportResult<()> {
        self.ops.push(DrawOp::Line { x1, y1, x2, y2 });
        Ok(())
    }

    fn place_image(
        &mut self,
        data: &[u8],
        x: f64,
        y: f64,
        fit_width: f64,
        fit_height: f64,
    ) -> ReportResult<()> {
        self.ops.push(DrawOp::Image {
            x,
            y,
            fit_width,
            fit_height,
            byte_len: data.len(),
        });
        Ok(())
    }

    fn new_page(&mut self) -> ReportResult<()> {
        self.ops.push(DrawOp::NewPage);
        Ok(())
    }
}
