//! Capture contexts: the device parameters a trace was recorded under and
//! the scale factors derived from them.

use crate::error::ModelError;
use crate::format::{ChannelProperty, TraceFormat};
use inkline_types::{himetric_to_pixel, units_to_himetric};
use serde::Serialize;

/// The device/source description of a context: a trace format plus the
/// channel properties that refined it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InkSource {
    pub id: Option<String>,
    pub trace_format: TraceFormat,
    /// All channel properties, in document order, for re-serialization.
    pub channel_properties: Vec<ChannelProperty>,
}

/// An opaque capture timestamp; `time_string` is round-tripped verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timestamp {
    pub id: Option<String>,
    pub time_string: Option<String>,
}

/// Scale factors derived from an ink source's channel definitions.
///
/// A pure function of the channels and the target dpi, computed once when
/// the context is built and cached for its lifetime. If the ink source
/// changes the whole set is recomputed; there is no incremental
/// invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleFactors {
    /// Pixels per raw X sample.
    pub x_factor: f64,
    /// Pixels per raw Y sample.
    pub y_factor: f64,
    /// Maps a raw force delta from neutral to a signed width modulation.
    pub f_factor: f64,
    /// The raw force value that leaves the brush width unchanged.
    pub f_neutral: f64,
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self { x_factor: 1.0, y_factor: 1.0, f_factor: 1.0, f_neutral: 0.5 }
    }
}

impl ScaleFactors {
    /// Derives the factors for `source` at the given output dpi.
    ///
    /// Channels without a usable resolution keep the identity factor, and
    /// a force channel without a usable range keeps the identity force
    /// map; both conditions are reported.
    pub fn from_source(source: &InkSource, dpi: f64) -> Self {
        let mut factors = Self::default();

        for (name, slot) in [("X", &mut factors.x_factor), ("Y", &mut factors.y_factor)] {
            if let Some(channel) = source.trace_format.channel(name) {
                if channel.resolution > 0.0 {
                    let himetric_per_sample =
                        units_to_himetric(1.0 / channel.resolution, &channel.units);
                    *slot = himetric_to_pixel(himetric_per_sample, dpi);
                } else {
                    log::warn!(
                        "channel '{name}' has no resolution; keeping identity scale"
                    );
                }
            }
        }

        if let Some(force) = source.trace_format.channel("F") {
            match force.max {
                Some(max) if max > force.min => {
                    factors.f_factor = 1.0 / (max - force.min);
                    factors.f_neutral = (max - force.min) / 2.0;
                }
                _ => {
                    log::warn!("{}", ModelError::UnusableForceRange(force.name.clone()));
                }
            }
        }

        factors
    }
}

/// A capture context: ink source, timestamp, and the cached scale factors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Context {
    pub id: String,
    pub ink_source: Option<InkSource>,
    pub timestamp: Option<Timestamp>,
    factors: ScaleFactors,
}

impl Context {
    pub fn new(
        id: impl Into<String>,
        ink_source: Option<InkSource>,
        timestamp: Option<Timestamp>,
        dpi: f64,
    ) -> Self {
        let factors = ink_source
            .as_ref()
            .map(|source| ScaleFactors::from_source(source, dpi))
            .unwrap_or_default();
        Self { id: id.into(), ink_source, timestamp, factors }
    }

    pub fn factors(&self) -> ScaleFactors {
        self.factors
    }

    /// The channel layout traces under this context follow, if known.
    pub fn trace_format(&self) -> Option<&TraceFormat> {
        self.ink_source.as_ref().map(|source| &source.trace_format)
    }
}
