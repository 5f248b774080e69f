//! The abstract drawing surface the renderer paints against.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

impl LineCap {
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

impl LineJoin {
    pub fn as_str(self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }
}

/// A canvas-like drawing surface.
///
/// Coordinates passed to `move_to`/`line_to` are in the surface's current
/// user space; `scale` multiplies into the current transform and also
/// scales the stroke width, and `save`/`restore` bracket the graphics
/// state (transform, color, width, cap, join). `stroke` paints the current
/// path without clearing it.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn scale(&mut self, sx: f64, sy: f64);
    fn set_stroke_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
}
