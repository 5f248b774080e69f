use thiserror::Error;

/// Structural problems in document entities.
///
/// None of these abort a document load: the offending entity is skipped or
/// defaulted, the condition is reported, and loading continues. The worst
/// outcome is an incompletely populated document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("brush is missing the required xml:id attribute")]
    BrushMissingId,

    #[error("inkSource{} has no traceFormat", fmt_id(.0))]
    MissingTraceFormat(Option<String>),

    #[error(
        "resolution property for channel '{channel}' has units '{units}', expected '1/{expected}'"
    )]
    ResolutionUnitMismatch {
        channel: String,
        units: String,
        expected: String,
    },

    #[error("channel '{channel}' attribute '{attribute}' is not a number: '{value}'")]
    BadNumericAttribute {
        channel: String,
        attribute: String,
        value: String,
    },

    #[error("force channel '{0}' has no usable min/max range")]
    UnusableForceRange(String),
}

fn fmt_id(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(" '{id}'"),
        None => String::new(),
    }
}
