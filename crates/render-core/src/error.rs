use thiserror::Error;

/// Reference problems hit while rendering.
///
/// A missing context skips that trace; a missing brush degrades it to
/// default styling. Either way the rest of the document still renders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("trace '{0}' has no contextRef; skipping")]
    MissingContextRef(String),

    #[error("trace '{trace}': context '{context}' not found; skipping")]
    ContextNotFound { trace: String, context: String },

    #[error("trace '{trace}': brush '{brush}' not found; rendering unstyled")]
    BrushNotFound { trace: String, brush: String },
}
