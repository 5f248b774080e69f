//! In-memory representation of an ink document: device contexts, brushes,
//! and decoded traces, plus the cross-trace statistics that coordinate
//! normalization depends on.

pub mod brush;
pub mod context;
pub mod document;
pub mod error;
pub mod format;
pub mod trace;

pub use brush::{Brush, BrushProperty};
pub use context::{Context, InkSource, ScaleFactors, Timestamp};
pub use document::InkDocument;
pub use error::ModelError;
pub use format::{Channel, ChannelProperty, TraceFormat};
pub use trace::{Trace, TraceRecorder};
