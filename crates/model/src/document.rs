//! The document: owns contexts, brushes, traces, and the union statistics
//! across every decoded point.

use crate::brush::Brush;
use crate::context::Context;
use crate::trace::Trace;
use inkline_codec::ChannelAggregates;
use inkline_types::Rect;
use serde::Serialize;
use std::collections::BTreeMap;

/// An ink document.
///
/// Constructed empty (for live capture) or populated by the InkML reader;
/// mutated only by appending traces. Existing entities are never updated
/// or deleted. The per-channel aggregates are the fold of every trace's
/// decode statistics and exist to translate the union bounding box of all
/// ink to the surface origin.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InkDocument {
    contexts: BTreeMap<String, Context>,
    brushes: BTreeMap<String, Brush>,
    traces: Vec<Trace>,
    aggregates: ChannelAggregates,
}

impl InkDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_context(&mut self, context: Context) {
        self.contexts.insert(context.id.clone(), context);
    }

    pub fn insert_brush(&mut self, brush: Brush) {
        self.brushes.insert(brush.id.clone(), brush);
    }

    /// Looks up a context by bare id (no `#` prefix).
    pub fn context(&self, id: &str) -> Option<&Context> {
        self.contexts.get(id)
    }

    pub fn brush(&self, id: &str) -> Option<&Brush> {
        self.brushes.get(id)
    }

    pub fn contexts(&self) -> impl Iterator<Item = &Context> {
        self.contexts.values()
    }

    pub fn brushes(&self) -> impl Iterator<Item = &Brush> {
        self.brushes.values()
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn aggregates(&self) -> &ChannelAggregates {
        &self.aggregates
    }

    /// Appends a trace whose aggregates were already computed by decode,
    /// folding them into the document totals.
    pub fn fold_trace(&mut self, trace: Trace, aggregates: &ChannelAggregates) {
        self.aggregates.merge(aggregates);
        self.traces.push(trace);
    }

    /// Appends a trace, computing its aggregates from the table.
    pub fn push_trace(&mut self, trace: Trace) {
        let aggregates = ChannelAggregates::from_table(&trace.table);
        self.fold_trace(trace, &aggregates);
    }

    /// The union bounding box of all ink, in raw sample units of the first
    /// two channel columns. `None` until at least one point is decoded.
    pub fn extent(&self) -> Option<Rect> {
        let x = self.aggregates.column(0)?;
        let y = self.aggregates.column(1)?;
        Some(Rect::new(
            x.min as f64,
            y.min as f64,
            (x.max - x.min) as f64,
            (y.max - y.min) as f64,
        ))
    }
}
