//! Walks a document's traces and paints pressure-modulated line segments.

use crate::error::RenderError;
use crate::surface::{LineCap, LineJoin, Surface};
use inkline_model::{InkDocument, ScaleFactors, Trace, TraceFormat};
use inkline_types::himetric_to_pixel;
use itertools::Itertools;

/// Uniform boost applied to every painted stroke width; device brush
/// widths are hairline at screen dpi without it.
pub const WIDTH_BOOST: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Output resolution used to turn himetric widths and per-sample
    /// scales into pixels.
    pub dpi: f64,
    /// Paint each trace as one path at the brush's static width instead of
    /// re-stroking per segment with force-modulated widths.
    pub ignore_pressure: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { dpi: 150.0, ignore_pressure: false }
    }
}

/// Computes the force-modulated stroke width in himetric.
///
/// At `force == f_neutral` this returns `base_width` exactly; above
/// neutral the width grows linearly, below it shrinks.
pub fn adjusted_width(base_width: f64, force: f64, factors: ScaleFactors) -> f64 {
    base_width + base_width * ((force - factors.f_neutral) * factors.f_factor)
}

/// Column indexes of the position and force channels within a point.
#[derive(Debug, Clone, Copy)]
struct Columns {
    x: usize,
    y: usize,
    f: usize,
}

impl Columns {
    fn resolve(format: Option<&TraceFormat>) -> Self {
        // Fall back to the conventional X Y F column order when the
        // context carries no format.
        match format {
            Some(format) => Self {
                x: format.column("X").unwrap_or(0),
                y: format.column("Y").unwrap_or(1),
                f: format.column("F").unwrap_or(2),
            },
            None => Self { x: 0, y: 1, f: 2 },
        }
    }
}

pub struct StrokeRenderer<'a> {
    document: &'a InkDocument,
    settings: RenderSettings,
}

impl<'a> StrokeRenderer<'a> {
    pub fn new(document: &'a InkDocument, settings: RenderSettings) -> Self {
        Self { document, settings }
    }

    /// Paints every trace in document order.
    ///
    /// Reference problems are reported in the returned list; the affected
    /// trace is skipped (missing context) or rendered unstyled (missing
    /// brush) and the remaining traces still paint.
    pub fn render(&self, surface: &mut dyn Surface) -> Vec<RenderError> {
        let mut problems = Vec::new();
        for (index, trace) in self.document.traces().iter().enumerate() {
            self.render_trace(trace, index, surface, &mut problems);
        }
        problems
    }

    fn render_trace(
        &self,
        trace: &Trace,
        index: usize,
        surface: &mut dyn Surface,
        problems: &mut Vec<RenderError>,
    ) {
        let label = trace.label(index);

        let Some(context_id) = trace.context_ref.as_deref() else {
            report(problems, RenderError::MissingContextRef(label));
            return;
        };
        let Some(context) = self.document.context(context_id) else {
            report(
                problems,
                RenderError::ContextNotFound { trace: label, context: context_id.to_string() },
            );
            return;
        };

        let brush = match trace.brush_ref.as_deref() {
            Some(brush_id) => {
                let brush = self.document.brush(brush_id);
                if brush.is_none() {
                    report(
                        problems,
                        RenderError::BrushNotFound {
                            trace: label.clone(),
                            brush: brush_id.to_string(),
                        },
                    );
                }
                brush
            }
            None => None,
        };

        let factors = context.factors();
        let columns = Columns::resolve(context.trace_format());

        surface.save();
        // The horizontal factor scales both axes; square device pixels are
        // assumed.
        surface.scale(factors.x_factor, factors.x_factor);

        if let Some(brush) = brush {
            surface.set_stroke_color(brush.color());
            surface.set_line_cap(LineCap::Round);
            surface.set_line_join(LineJoin::Round);
            surface.set_line_width(self.pixel_width(brush.width()));
        }

        if self.settings.ignore_pressure {
            self.render_flat(trace, columns, surface);
        } else {
            self.render_pressured(trace, columns, brush.map(|b| b.width()), factors, surface);
        }

        surface.restore();
    }

    /// One continuous path at a static width.
    fn render_flat(&self, trace: &Trace, columns: Columns, surface: &mut dyn Surface) {
        surface.begin_path();
        let mut started = false;
        for row in &trace.table {
            let Some((x, y)) = self.position(row, columns) else { continue };
            if started {
                surface.line_to(x, y);
            } else {
                surface.move_to(x, y);
                started = true;
            }
        }
        surface.stroke();
    }

    /// One sub-path per segment, each stroked at its own width.
    ///
    /// Widths differ between consecutive segments, so each pair of points
    /// becomes its own path; no blending is attempted within a path. A
    /// single-point trace produces no segment and paints nothing.
    fn render_pressured(
        &self,
        trace: &Trace,
        columns: Columns,
        brush_width: Option<f64>,
        factors: ScaleFactors,
        surface: &mut dyn Surface,
    ) {
        for (previous, current) in trace.table.iter().tuple_windows() {
            let (Some((x1, y1)), Some((x2, y2))) =
                (self.position(previous, columns), self.position(current, columns))
            else {
                continue;
            };

            if let Some(base_width) = brush_width {
                let force = match (previous.get(columns.f), current.get(columns.f)) {
                    (Some(&a), Some(&b)) => (a as f64 + b as f64) / 2.0,
                    _ => 0.0,
                };
                if force != 0.0 {
                    let width = adjusted_width(base_width, force, factors);
                    surface.set_line_width(self.pixel_width(width));
                }
            }

            surface.begin_path();
            surface.move_to(x1, y1);
            surface.line_to(x2, y2);
            surface.stroke();
        }
    }

    /// Surface coordinates: raw samples translated so the union bounding
    /// box of all ink in the document starts at the origin.
    fn position(&self, row: &[i64], columns: Columns) -> Option<(f64, f64)> {
        let mins = self.document.aggregates();
        let x = row.get(columns.x)? - mins.min(columns.x).unwrap_or(0);
        let y = row.get(columns.y)? - mins.min(columns.y).unwrap_or(0);
        Some((x as f64, y as f64))
    }

    fn pixel_width(&self, himetric: f64) -> f64 {
        himetric_to_pixel(himetric, self.settings.dpi) * WIDTH_BOOST
    }
}

fn report(problems: &mut Vec<RenderError>, problem: RenderError) {
    log::warn!("{problem}");
    problems.push(problem);
}
