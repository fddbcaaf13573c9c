//! Error types for the response aggregation pipeline.
//!
//! This module declares focused, composable error types used across response
//! allocation, registration, lookup, and distributed reduction. Each error
//! carries enough context to make failures actionable while remaining small
//! and cheap to pass around or convert into the aggregate [`ResponseError`].
//!
//! ## Goals
//! * **Specificity:** Each type models a single failure mode (a missing
//!   registration parameter, an unknown field name, an unsupported variant,
//!   a failed collective).
//! * **Ergonomics:** All errors implement [`std::error::Error`] and
//!   [`fmt::Display`], and provide `From<T>` conversions into aggregates so
//!   call sites can use `?`.
//! * **Actionability:** Structured fields (the offending parameter name, the
//!   allocated field list, the rejected variant tag) make logs useful
//!   without reproducing the issue.
//!
//! ## Contract violations
//! Programming defects are not represented here. An accumulator/field count
//! mismatch, a field view shorter than its batch, or a fill on an
//! unallocated store panics with the counts involved and aborts the
//! evaluation cycle; those conditions are never retried and never surface as
//! `Err` values.

use std::fmt;

use crate::response::types::{EvaluationTag, FieldName};


/// Returned when a registration or construction parameter is missing or
/// malformed.
///
/// Detected when an aggregator is built or an evaluation request is
/// registered; never retryable without fixing the configuration.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A required parameter was not supplied.
    MissingParameter {
        /// Name of the absent parameter.
        name: &'static str,
    },

    /// A parameter was supplied with an unusable value.
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,

        /// The value that was supplied, rendered for diagnostics.
        given: String,

        /// What the parameter requires.
        requirement: &'static str,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::MissingParameter { name } => {
                write!(f, "missing required parameter \"{}\"", name)
            }
            ConfigurationError::InvalidParameter {
                name,
                given,
                requirement,
            } => {
                write!(
                    f,
                    "invalid parameter \"{}\": got {}, expected {}",
                    name, given, requirement
                )
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Returned when a requested field name is absent from a data store's
/// allocated field set.
///
/// Local and recoverable: the caller may pick a different field. The store
/// and the destination response are left untouched.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLookupError {
    /// The field name that was requested.
    pub field: FieldName,

    /// The field names the store was allocated with.
    pub known: Vec<FieldName>,
}

impl fmt::Display for FieldLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field \"{}\" not present in response data (allocated fields: {})",
            self.field,
            self.known.join(", ")
        )
    }
}

impl std::error::Error for FieldLookupError {}

/// Returned when the builder is asked for an evaluation variant it cannot
/// construct.
///
/// Surfaced immediately; the builder never silently substitutes another
/// variant.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedVariantError {
    /// The variant tag that was requested.
    pub tag: EvaluationTag,
}

impl fmt::Display for UnsupportedVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no functional aggregator is available for the {} evaluation variant",
            self.tag
        )
    }
}

impl std::error::Error for UnsupportedVariantError {}

/// Returned when the distributed reduction collective fails.
///
/// The communication substrate offers no partial-failure semantics, so this
/// is fatal to the current evaluation cycle; the core attempts no local
/// recovery.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReductionError {
    /// Substrate-supplied description of the failure.
    pub detail: String,
}

impl ReductionError {
    /// Creates a reduction error from a substrate diagnostic.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ReductionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "global reduction failed: {}", self.detail)
    }
}

impl std::error::Error for ReductionError {}

/// Aggregate error for aggregator construction via the builder.
///
/// Conversions (`From<T>`) are implemented for the underlying kinds so the
/// builder can use `?` internally while callers still match on the precise
/// failure.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// The requested variant has no aggregator implementation.
    UnsupportedVariant(UnsupportedVariantError),

    /// The builder's shared configuration was incomplete.
    Configuration(ConfigurationError),
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderError::UnsupportedVariant(e) => write!(f, "{e}"),
            BuilderError::Configuration(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for BuilderError {}

impl From<UnsupportedVariantError> for BuilderError {
    fn from(e: UnsupportedVariantError) -> Self {
        BuilderError::UnsupportedVariant(e)
    }
}

impl From<ConfigurationError> for BuilderError {
    fn from(e: ConfigurationError) -> Self {
        BuilderError::Configuration(e)
    }
}

/// High-level error covering every recoverable failure in the pipeline.
///
/// Callers driving a full evaluation cycle (build, register, reduce, fill)
/// can bubble all failures into this type with `?` and still preserve the
/// underlying structured error for matching or logging.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// A registration or construction parameter was missing or malformed.
    Configuration(ConfigurationError),

    /// A requested field was absent from a data store.
    FieldLookup(FieldLookupError),

    /// The builder was asked for an unsupported evaluation variant.
    UnsupportedVariant(UnsupportedVariantError),

    /// The distributed reduction collective failed.
    Reduction(ReductionError),
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::Configuration(e) => write!(f, "{e}"),
            ResponseError::FieldLookup(e) => write!(f, "{e}"),
            ResponseError::UnsupportedVariant(e) => write!(f, "{e}"),
            ResponseError::Reduction(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ResponseError {}

impl From<ConfigurationError> for ResponseError {
    fn from(e: ConfigurationError) -> Self {
        ResponseError::Configuration(e)
    }
}

impl From<FieldLookupError> for ResponseError {
    fn from(e: FieldLookupError) -> Self {
        ResponseError::FieldLookup(e)
    }
}

impl From<UnsupportedVariantError> for ResponseError {
    fn from(e: UnsupportedVariantError) -> Self {
        ResponseError::UnsupportedVariant(e)
    }
}

impl From<ReductionError> for ResponseError {
    fn from(e: ReductionError) -> Self {
        ResponseError::Reduction(e)
    }
}

impl From<BuilderError> for ResponseError {
    fn from(e: BuilderError) -> Self {
        match e {
            BuilderError::UnsupportedVariant(e) => ResponseError::UnsupportedVariant(e),
            BuilderError::Configuration(e) => ResponseError::Configuration(e),
        }
    }
}
