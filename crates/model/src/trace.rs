//! Traces: one pen-down-to-pen-up stroke as an ordered point table.

use crate::document::InkDocument;
use serde::Serialize;

/// A decoded stroke.
///
/// The table holds absolute integer samples in the channels' native units,
/// one row per point, columns laid out by the referenced context's trace
/// format. Context and brush are referenced by bare id (no `#` prefix) and
/// resolved by lookup at render/serialize time; a dangling reference is a
/// reportable, non-fatal render condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trace {
    /// Explicit `xml:id`, when the trace had one. Traces without an id are
    /// addressed by their position in the document.
    pub id: Option<String>,
    pub context_ref: Option<String>,
    pub brush_ref: Option<String>,
    /// Opaque `timeOffset` attribute, round-tripped verbatim.
    pub time_offset: Option<String>,
    pub table: Vec<Vec<i64>>,
}

impl Trace {
    /// Display label for diagnostics: the explicit id, or the positional
    /// index for anonymous traces.
    pub fn label(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("#{index}"),
        }
    }
}

/// Accumulates absolute points for a stroke captured live.
///
/// Points arrive in event order, already absolute (capture does not go
/// through the packet codec). `finish` folds the completed trace and its
/// statistics into a document.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    trace: Trace,
}

impl TraceRecorder {
    pub fn new(context_ref: Option<String>, brush_ref: Option<String>) -> Self {
        Self {
            trace: Trace { context_ref, brush_ref, ..Trace::default() },
        }
    }

    pub fn push_point(&mut self, point: Vec<i64>) {
        self.trace.table.push(point);
    }

    pub fn len(&self) -> usize {
        self.trace.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace.table.is_empty()
    }

    /// Completes the stroke and appends it to `document`, folding its
    /// aggregates in.
    pub fn finish(self, document: &mut InkDocument) {
        document.push_trace(self.trace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_prefers_explicit_id() {
        let trace = Trace { id: Some("t1".into()), ..Trace::default() };
        assert_eq!(trace.label(4), "t1");
        assert_eq!(Trace::default().label(4), "#4");
    }

    #[test]
    fn test_recorder_folds_into_document() {
        let mut document = InkDocument::new();
        let mut recorder = TraceRecorder::new(Some("ctx".into()), None);
        recorder.push_point(vec![10, 20]);
        recorder.push_point(vec![12, 18]);
        recorder.finish(&mut document);

        assert_eq!(document.traces().len(), 1);
        assert_eq!(document.aggregates().min(0), Some(10));
        assert_eq!(document.aggregates().max(1), Some(20));
        assert_eq!(document.aggregates().count(0), 2);
    }
}
