//! A surface that records the command stream instead of drawing.
//!
//! Rendering tests assert on the recorded ops, so renderer behavior is
//! checked without rasterizing anything.

use crate::surface::{LineCap, LineJoin, Surface};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SurfaceOp {
    Save,
    Restore,
    Scale(f64, f64),
    StrokeColor(String),
    LineWidth(f64),
    LineCap(LineCap),
    LineJoin(LineJoin),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Stroke,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    /// Count of ops matching a predicate; keeps assertions terse.
    pub fn count(&self, predicate: impl Fn(&SurfaceOp) -> bool) -> usize {
        self.ops.iter().filter(|op| predicate(op)).count()
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.ops.push(SurfaceOp::Save);
    }
    fn restore(&mut self) {
        self.ops.push(SurfaceOp::Restore);
    }
    fn scale(&mut self, sx: f64, sy: f64) {
        self.ops.push(SurfaceOp::Scale(sx, sy));
    }
    fn set_stroke_color(&mut self, color: &str) {
        self.ops.push(SurfaceOp::StrokeColor(color.to_string()));
    }
    fn set_line_width(&mut self, width: f64) {
        self.ops.push(SurfaceOp::LineWidth(width));
    }
    fn set_line_cap(&mut self, cap: LineCap) {
        self.ops.push(SurfaceOp::LineCap(cap));
    }
    fn set_line_join(&mut self, join: LineJoin) {
        self.ops.push(SurfaceOp::LineJoin(join));
    }
    fn begin_path(&mut self) {
        self.ops.push(SurfaceOp::BeginPath);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(SurfaceOp::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(SurfaceOp::LineTo(x, y));
    }
    fn stroke(&mut self) {
        self.ops.push(SurfaceOp::Stroke);
    }
}
