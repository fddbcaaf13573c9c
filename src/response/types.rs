//! Core scalar kinds and evaluation variants for response aggregation.
//!
//! This module defines the **numeric element types and variant selectors**
//! shared by every component of the response pipeline: the data store, the
//! response object, the aggregator, and the builder.
//!
//! ## Scalar kinds
//!
//! A response accumulator slot holds one value of a *scalar kind*:
//!
//! * [`RealType`] — a plain floating-point scalar, used by the value
//!   evaluation variant.
//! * [`ExpansionValue`] — a vector of expansion coefficients, used by the
//!   uncertainty-quantification variant.
//!
//! Both implement [`ResponseScalar`], the minimal arithmetic the pipeline
//! needs: a zero value, in-place re-zeroing, and in-place addition.
//!
//! ## Evaluation variants
//!
//! An evaluation variant decides the scalar kind and the cross-partition
//! combination rule at the type level. Variants are **unit tag types**
//! implementing [`Evaluation`]; components are generic over the tag, so no
//! variant branching exists outside the builder's dispatch.
//!
//! * [`ValueEvaluation`] — plain scalar evaluation; reduction is an
//!   element-wise sum across partitions.
//! * [`ExpansionEvaluation`] — expansion-valued evaluation; reduction leaves
//!   local coefficients untouched (see [`ExpansionEvaluation`] docs).
//!
//! [`EvaluationTag`] is the runtime mirror of the tag types, consumed only by
//! the aggregator builder when callers select a variant dynamically.

use std::fmt;

use crate::response::comm::ReductionChannel;
use crate::response::error::ReductionError;


/// Plain floating-point scalar stored by the value evaluation variant.
pub type RealType = f64;

/// Unique name of one scalar response quantity.
pub type FieldName = String;

/// Partition-local unknown index.
pub type LocalIndex = usize;

/// Globally unique unknown index across all partitions.
pub type GlobalIndex = u64;

/// Minimal arithmetic required of an accumulator element.
///
/// ## Semantics
/// * [`ResponseScalar::zero`] is the additive identity.
/// * [`ResponseScalar::set_zero`] resets a value in place without
///   reallocating.
/// * [`ResponseScalar::accumulate`] performs `self += rhs`.
///
/// Addition must be associative and commutative up to floating-point
/// rounding; the aggregator relies on this to sum cells in any order and to
/// merge per-thread partial sums.

pub trait ResponseScalar: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Returns the additive identity of this scalar kind.
    fn zero() -> Self;

    /// Resets this value to the additive identity in place.
    fn set_zero(&mut self);

    /// Adds `rhs` into this value.
    fn accumulate(&mut self, rhs: &Self);
}

impl ResponseScalar for RealType {
    fn zero() -> Self {
        0.0
    }

    fn set_zero(&mut self) {
        *self = 0.0;
    }

    fn accumulate(&mut self, rhs: &Self) {
        *self += rhs;
    }
}

/// A quantity expressed as coefficients of an uncertainty expansion.
///
/// ## Semantics
/// Addition is coefficient-wise. When two values have different coefficient
/// counts, the shorter one is treated as zero-padded: accumulating a longer
/// value grows the destination to match. The zero value is the empty
/// coefficient vector, so freshly allocated accumulators take their length
/// from the first contribution.
///
/// ## Typical use cases
/// * Integrated functionals under a polynomial-chaos expansion
/// * Moments of uncertain response quantities

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ExpansionValue {
    coefficients: Vec<RealType>,
}

impl ExpansionValue {
    /// Creates an expansion value from explicit coefficients.
    pub fn new(coefficients: Vec<RealType>) -> Self {
        Self { coefficients }
    }

    /// Creates a zero expansion value with `terms` coefficients.
    pub fn with_terms(terms: usize) -> Self {
        Self {
            coefficients: vec![0.0; terms],
        }
    }

    /// Returns the coefficient vector.
    pub fn coefficients(&self) -> &[RealType] {
        &self.coefficients
    }

    /// Returns the number of expansion terms held.
    pub fn terms(&self) -> usize {
        self.coefficients.len()
    }

    /// Returns the zeroth coefficient, the expansion mean.
    ///
    /// An empty expansion has mean zero.
    pub fn mean(&self) -> RealType {
        self.coefficients.first().copied().unwrap_or(0.0)
    }
}

impl ResponseScalar for ExpansionValue {
    fn zero() -> Self {
        Self {
            coefficients: Vec::new(),
        }
    }

    fn set_zero(&mut self) {
        for coefficient in &mut self.coefficients {
            *coefficient = 0.0;
        }
    }

    fn accumulate(&mut self, rhs: &Self) {
        if rhs.coefficients.len() > self.coefficients.len() {
            self.coefficients.resize(rhs.coefficients.len(), 0.0);
        }
        for (lhs, rhs) in self.coefficients.iter_mut().zip(rhs.coefficients.iter()) {
            *lhs += rhs;
        }
    }
}

/// Runtime identifier for an evaluation variant.
///
/// Used only by [`AggregatorBuilder::build`] when the variant is chosen
/// dynamically; everywhere else the variant is a type parameter.
///
/// [`AggregatorBuilder::build`]: crate::response::builder::AggregatorBuilder::build

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EvaluationTag {
    /// Plain scalar evaluation.
    Value,

    /// Expansion-valued (uncertainty quantification) evaluation.
    Expansion,

    /// Gradient evaluation.
    ///
    /// No functional aggregator exists for this variant; requesting it from
    /// the builder fails with an unsupported-variant error.
    Gradient,
}

impl fmt::Display for EvaluationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationTag::Value => f.write_str("value"),
            EvaluationTag::Expansion => f.write_str("expansion"),
            EvaluationTag::Gradient => f.write_str("gradient"),
        }
    }
}

/// Compile-time selector for an evaluation variant.
///
/// An implementation fixes the scalar kind stored per accumulator slot and
/// supplies the variant's cross-partition combination rule. All pipeline
/// components are generic over this trait, so adding a variant never touches
/// aggregator logic.

pub trait Evaluation: Send + Sync + 'static {
    /// Element type stored in each accumulator slot.
    type Scalar: ResponseScalar;

    /// Runtime tag mirroring this variant.
    const TAG: EvaluationTag;

    /// Human-readable variant name used in diagnostics.
    const NAME: &'static str;

    /// Combines each accumulator across all partitions of `channel`.
    ///
    /// On success every local value has been replaced according to the
    /// variant's combination rule. Implementations must call the channel at
    /// most once and must not partially update `accumulators` on failure.
    fn reduce(
        channel: &dyn ReductionChannel,
        accumulators: &mut [Self::Scalar],
    ) -> Result<(), ReductionError>;
}

/// Plain scalar evaluation variant.
///
/// Accumulators are [`RealType`] values; the reduction replaces each local
/// partial sum with the element-wise total across all partitions.

#[derive(Clone, Copy, Debug, Default)]
pub struct ValueEvaluation;

impl Evaluation for ValueEvaluation {
    type Scalar = RealType;

    const TAG: EvaluationTag = EvaluationTag::Value;

    const NAME: &'static str = "value";

    fn reduce(
        channel: &dyn ReductionChannel,
        accumulators: &mut [Self::Scalar],
    ) -> Result<(), ReductionError> {
        if accumulators.is_empty() {
            return Ok(());
        }

        let local = accumulators.to_vec();
        let mut global = vec![0.0; local.len()];
        channel.sum_all(&local, &mut global)?;

        accumulators.copy_from_slice(&global);
        Ok(())
    }
}

/// Expansion-valued evaluation variant.
///
/// Accumulators are [`ExpansionValue`]s. The reduction leaves local
/// coefficients untouched: a coefficient-wise sum is only meaningful when
/// every partition expands against an identical basis, a property this layer
/// cannot observe. Cross-partition combination of expansion coefficients is
/// owned by the uncertainty layer driving the evaluation.

#[derive(Clone, Copy, Debug, Default)]
pub struct ExpansionEvaluation;

impl Evaluation for ExpansionEvaluation {
    type Scalar = ExpansionValue;

    const TAG: EvaluationTag = EvaluationTag::Expansion;

    const NAME: &'static str = "expansion";

    fn reduce(
        _channel: &dyn ReductionChannel,
        _accumulators: &mut [Self::Scalar],
    ) -> Result<(), ReductionError> {
        Ok(())
    }
}
