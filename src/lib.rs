//! # Response Aggregation
//!
//! Response aggregation and distributed reduction core for mesh-based
//! simulation engines.
//!
//! This crate turns per-cell, per-pass field values into named scalar
//! "response" quantities (integrated functionals and their
//! uncertainty-quantification counterparts) usable for analysis or
//! optimization.
//!
//! ## Design Goals
//! - Purely additive accumulation, safe under any cell order
//! - One uniform protocol across numerically distinct evaluation variants
//! - Correct partial-sum reduction across distributed mesh partitions
//! - Merging of independently computed responses into one
//!
//! The mesh, the field evaluation engine, and the communication transport
//! are external collaborators reached through narrow interfaces; this crate
//! implements none of them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(dead_code)]

pub mod response;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (Public API)
// ─────────────────────────────────────────────────────────────────────────────

// Core pipeline types

pub use response::aggregator::{
    Aggregator,
    FunctionalAggregator,
    ScalarOf,
};

pub use response::builder::{
    AggregatorBuilder,
    BuiltAggregator,
};

pub use response::data::ResponseData;
pub use response::response::Response;

pub use response::types::{
    Evaluation,
    EvaluationTag,
    ExpansionEvaluation,
    ExpansionValue,
    FieldName,
    GlobalIndex,
    LocalIndex,
    RealType,
    ResponseScalar,
    ValueEvaluation,
};

pub use response::batch::{CellBatch, CellField};

pub use response::config::{
    AggregatorConfig,
    GlobalIndexer,
    LinearObjectFactory,
};

pub use response::engine::{EvaluationEngine, EvaluationRequest};
pub use response::comm::{ReductionChannel, SerialChannel};
pub use response::params::{AggregatorParams, WORKSET_SIZE};

pub use response::error::{
    BuilderError,
    ConfigurationError,
    FieldLookupError,
    ReductionError,
    ResponseError,
    UnsupportedVariantError,
};

// ─────────────────────────────────────────────────────────────────────────────
// Prelude (Optional but recommended)
// ─────────────────────────────────────────────────────────────────────────────

/// Commonly used response pipeline types.
///
/// Import with:
/// ```rust
/// use response_aggregation::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Aggregator,
        AggregatorBuilder,
        AggregatorParams,
        CellBatch,
        CellField,
        EvaluationTag,
        ExpansionEvaluation,
        FunctionalAggregator,
        Response,
        ResponseData,
        ResponseScalar,
        SerialChannel,
        ValueEvaluation,
    };
}
