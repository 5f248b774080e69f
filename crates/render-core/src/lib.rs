//! Backend-agnostic stroke rendering.
//!
//! [`Surface`] abstracts the drawing primitives a backend must provide;
//! [`StrokeRenderer`] walks a document's traces and paints them as
//! pressure-modulated line segments against any surface.

pub mod error;
pub mod recording;
pub mod renderer;
pub mod surface;

pub use error::RenderError;
pub use recording::{RecordingSurface, SurfaceOp};
pub use renderer::{adjusted_width, RenderSettings, StrokeRenderer};
pub use surface::{LineCap, LineJoin, Surface};
