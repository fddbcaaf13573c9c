//! Evaluation-engine interface.
//!
//! The evaluation engine owns field evaluation and pass scheduling; this
//! core only registers requests with it. A registered request obligates the
//! engine to, for each pass of up to `workset_size` cells, call back into
//! the owning aggregator's accumulation routine with per-cell views matching
//! `fields` in order, and to treat those fields as required outputs of the
//! pass.

use crate::response::types::{EvaluationTag, FieldName};


/// One scheduled response scatter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluationRequest {
    /// Fields the engine must evaluate and hand back, in slot order.
    pub fields: Vec<FieldName>,

    /// Upper bound on cells per pass.
    pub workset_size: usize,

    /// Evaluation variant the pass runs under.
    pub variant: EvaluationTag,
}

/// Scheduling surface of the external evaluation engine.
///
/// The single mutation this core performs on the engine: adding a scatter
/// request to its schedule.
pub trait EvaluationEngine {
    /// Schedules `request` and marks its fields as required pass outputs.
    fn require_response_scatter(&mut self, request: EvaluationRequest);
}
