//! SVG drawing surface backend.
//!
//! Implements the abstract [`Surface`] against an SVG document: every
//! `stroke` snapshots the current path and graphics state as one `<path>`
//! element, and `into_svg` serializes the collected elements with
//! `quick-xml`.

use inkline_render_core::{LineCap, LineJoin, Surface};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::fmt::Write as _;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvgError {
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Canvas-like graphics state.
#[derive(Debug, Clone)]
struct GraphicsState {
    scale: (f64, f64),
    stroke_color: String,
    line_width: f64,
    line_cap: LineCap,
    line_join: LineJoin,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            scale: (1.0, 1.0),
            stroke_color: "#000000".into(),
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
        }
    }
}

/// One stroked path, frozen with the state it was stroked under.
#[derive(Debug, Clone)]
struct StrokedPath {
    data: String,
    state: GraphicsState,
}

/// A [`Surface`] that accumulates stroked paths and renders them as SVG.
#[derive(Debug, Default)]
pub struct SvgSurface {
    size: Option<(f64, f64)>,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    path: String,
    paths: Vec<StrokedPath>,
}

impl SvgSurface {
    /// A surface whose output `<svg>` carries no explicit size.
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface with explicit pixel dimensions on the output element.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self { size: Some((width, height)), ..Self::default() }
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Serializes the collected paths into an SVG document.
    pub fn into_svg(self) -> Result<String, SvgError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        let mut svg = BytesStart::new("svg");
        svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
        if let Some((width, height)) = self.size {
            svg.push_attribute(("width", fmt_number(width).as_str()));
            svg.push_attribute(("height", fmt_number(height).as_str()));
        }
        svg.push_attribute(("fill", "none"));
        writer.write_event(Event::Start(svg))?;

        for path in &self.paths {
            let mut element = BytesStart::new("path");
            element.push_attribute(("d", path.data.as_str()));
            element.push_attribute(("stroke", path.state.stroke_color.as_str()));
            element.push_attribute(("stroke-width", fmt_number(path.state.line_width).as_str()));
            element.push_attribute(("stroke-linecap", path.state.line_cap.as_str()));
            element.push_attribute(("stroke-linejoin", path.state.line_join.as_str()));
            let (sx, sy) = path.state.scale;
            if (sx, sy) != (1.0, 1.0) {
                element.push_attribute((
                    "transform",
                    format!("scale({} {})", fmt_number(sx), fmt_number(sy)).as_str(),
                ));
            }
            writer.write_event(Event::Empty(element))?;
        }

        writer.write_event(Event::End(BytesEnd::new("svg")))?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn fmt_number(value: f64) -> String {
    // Trim ".0" off integral values so path data stays compact.
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

impl Surface for SvgSurface {
    fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.scale.0 *= sx;
        self.state.scale.1 *= sy;
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.state.stroke_color = color.to_string();
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        if !self.path.is_empty() {
            self.path.push(' ');
        }
        let _ = write!(self.path, "M {} {}", fmt_number(x), fmt_number(y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if !self.path.is_empty() {
            self.path.push(' ');
        }
        let _ = write!(self.path, "L {} {}", fmt_number(x), fmt_number(y));
    }

    fn stroke(&mut self) {
        // An unstroked path stays current; stroking snapshots it without
        // clearing, like a canvas context.
        if self.path.is_empty() {
            return;
        }
        self.paths.push(StrokedPath { data: self.path.clone(), state: self.state.clone() });
    }
}
