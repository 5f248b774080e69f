//! Trace formats: the ordered channel layout every trace must follow.

use crate::error::ModelError;
use serde::Serialize;

/// One named measurement dimension of a point sample.
///
/// Immutable once parsed, except for `resolution`, which a `resolution`
/// channel property may refine before the owning format is sealed into a
/// context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    pub name: String,
    /// The `type` attribute, kept verbatim (`integer`, `decimal`, ...).
    pub kind: Option<String>,
    /// Lower bound of the raw value range; the format defaults it to 0.
    pub min: f64,
    /// Upper bound of the raw value range, when declared.
    pub max: Option<f64>,
    /// Physical unit token for raw values.
    pub units: String,
    /// Samples per unit; 0 means unspecified.
    pub resolution: f64,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            min: 0.0,
            max: None,
            units: String::new(),
            resolution: 0.0,
        }
    }

    /// Applies a `resolution` channel property.
    ///
    /// The property's units must be the reciprocal of the channel's own
    /// units (`1/<unit>`); anything else is reported and ignored rather
    /// than silently accepted with the wrong unit.
    pub fn apply_resolution(&mut self, property: &ChannelProperty) -> Result<(), ModelError> {
        let mismatch = || ModelError::ResolutionUnitMismatch {
            channel: self.name.clone(),
            units: property.units.clone(),
            expected: self.units.clone(),
        };
        let base = property.units.strip_prefix("1/").ok_or_else(mismatch)?;
        if base != self.units {
            return Err(mismatch());
        }
        self.resolution = property.value;
        Ok(())
    }
}

/// A property refining one channel of an ink source, typically
/// `resolution`. Kept in full for re-serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelProperty {
    pub channel: String,
    pub name: String,
    pub value: f64,
    pub units: String,
}

/// An ordered mapping from channel name to [`Channel`].
///
/// Defines the column layout of every trace that references it: column `j`
/// of a decoded point belongs to channel `j` of the format.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TraceFormat {
    pub id: Option<String>,
    channels: Vec<Channel>,
}

impl TraceFormat {
    pub fn new(id: Option<String>) -> Self {
        Self { id, channels: Vec::new() }
    }

    pub fn push_channel(&mut self, channel: Channel) {
        self.channels.push(channel);
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.name == name)
    }

    pub fn channel_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.iter_mut().find(|c| c.name == name)
    }

    /// Column index of the named channel within a decoded point.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.channels.iter().position(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(channel: &str, units: &str, value: f64) -> ChannelProperty {
        ChannelProperty {
            channel: channel.into(),
            name: "resolution".into(),
            value,
            units: units.into(),
        }
    }

    #[test]
    fn test_apply_resolution_matching_units() {
        let mut channel = Channel { units: "cm".into(), ..Channel::new("X") };
        channel.apply_resolution(&property("X", "1/cm", 1000.0)).unwrap();
        assert_eq!(channel.resolution, 1000.0);
    }

    #[test]
    fn test_apply_resolution_rejects_non_reciprocal_units() {
        let mut channel = Channel { units: "cm".into(), ..Channel::new("X") };
        let err = channel.apply_resolution(&property("X", "cm", 1000.0)).unwrap_err();
        assert!(matches!(err, ModelError::ResolutionUnitMismatch { .. }));
        assert_eq!(channel.resolution, 0.0);
    }

    #[test]
    fn test_apply_resolution_rejects_wrong_base_unit() {
        let mut channel = Channel { units: "cm".into(), ..Channel::new("X") };
        let err = channel.apply_resolution(&property("X", "1/in", 1000.0)).unwrap_err();
        assert!(matches!(err, ModelError::ResolutionUnitMismatch { .. }));
    }

    #[test]
    fn test_format_preserves_channel_order() {
        let mut format = TraceFormat::new(None);
        for name in ["X", "Y", "F"] {
            format.push_channel(Channel::new(name));
        }
        assert_eq!(format.column("X"), Some(0));
        assert_eq!(format.column("F"), Some(2));
        assert_eq!(format.column("T"), None);
        assert_eq!(format.channel("Y").unwrap().name, "Y");
    }
}
