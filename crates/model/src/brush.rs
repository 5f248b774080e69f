//! Brushes: stroke styling parsed from brush properties.

use inkline_types::units_to_himetric;
use serde::Serialize;

/// One raw brush property, retained verbatim (name, value, units) so a
/// document re-serializes with every property it was loaded with, not only
/// the ones this renderer understands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrushProperty {
    pub name: String,
    pub value: String,
    pub units: Option<String>,
}

type PropertyInterpreter = fn(&mut Brush, &BrushProperty);

/// Interpreted brush properties: every property is stored either way, but
/// the ones listed here also update the brush's derived styling fields.
/// Extending the interpreted set means adding a row, not touching the
/// generic storage path.
const INTERPRETERS: &[(&str, PropertyInterpreter)] = &[
    ("color", |brush, property| {
        brush.color = property.value.clone();
    }),
    ("width", |brush, property| match property.value.parse::<f64>() {
        Ok(value) => {
            let units = property.units.as_deref().unwrap_or("");
            brush.width = units_to_himetric(value, units);
        }
        Err(_) => {
            log::warn!(
                "brush width value '{}' is not a number; keeping {}",
                property.value,
                brush.width
            );
        }
    }),
];

/// A brush: id, stroke color token, and width in himetric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Brush {
    pub id: String,
    width: f64,
    color: String,
    properties: Vec<BrushProperty>,
}

impl Brush {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            width: 10.0,
            color: "#000000".into(),
            properties: Vec::new(),
        }
    }

    /// Adds a property, interpreting it when it is one we understand.
    pub fn push_property(&mut self, property: BrushProperty) {
        if let Some((_, interpret)) =
            INTERPRETERS.iter().find(|(name, _)| *name == property.name)
        {
            interpret(self, &property);
        }
        self.properties.push(property);
    }

    /// Stroke width in himetric.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Stroke color as an opaque token, e.g. `#RRGGBB`.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// All properties in document order.
    pub fn properties(&self) -> &[BrushProperty] {
        &self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(name: &str, value: &str, units: Option<&str>) -> BrushProperty {
        BrushProperty {
            name: name.into(),
            value: value.into(),
            units: units.map(Into::into),
        }
    }

    #[test]
    fn test_defaults() {
        let brush = Brush::new("b1");
        assert_eq!(brush.width(), 10.0);
        assert_eq!(brush.color(), "#000000");
    }

    #[test]
    fn test_color_property_sets_token() {
        let mut brush = Brush::new("b1");
        brush.push_property(property("color", "#FF8800", None));
        assert_eq!(brush.color(), "#FF8800");
    }

    #[test]
    fn test_width_property_converts_to_himetric() {
        let mut brush = Brush::new("b1");
        brush.push_property(property("width", "0.5", Some("mm")));
        assert_eq!(brush.width(), 50.0);
    }

    #[test]
    fn test_unparseable_width_keeps_previous() {
        let mut brush = Brush::new("b1");
        brush.push_property(property("width", "wide", Some("mm")));
        assert_eq!(brush.width(), 10.0);
        // still retained for round-trip
        assert_eq!(brush.properties().len(), 1);
    }

    #[test]
    fn test_uninterpreted_properties_are_retained_in_order() {
        let mut brush = Brush::new("b1");
        brush.push_property(property("tip", "ellipse", None));
        brush.push_property(property("color", "#123456", None));
        brush.push_property(property("rasterOp", "copyPen", None));
        let names: Vec<_> = brush.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["tip", "color", "rasterOp"]);
        assert_eq!(brush.color(), "#123456");
    }
}
