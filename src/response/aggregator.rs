//! Functional response aggregation.
//!
//! This module defines the **aggregator**: the orchestrator that turns
//! per-cell field values into named scalar responses. One aggregator
//! instance serves one evaluation variant and is reusable across many data
//! store lifecycles; it holds construction-time configuration only and never
//! retains a reference to a particular store between calls.
//!
//! ## Execution model
//!
//! One evaluation cycle proceeds in four steps:
//!
//! 1. **Allocation** — [`Aggregator::build_response_data`] creates a fresh,
//!    zeroed store for a field set.
//! 2. **Accumulation** — the evaluation engine invokes
//!    [`Aggregator::accumulate`] once per pass; contributions are purely
//!    additive and cell-order independent, so repeated passes keep summing
//!    until the store is reinitialized.
//! 3. **Reduction** — [`Aggregator::global_reduce`] combines each
//!    accumulator across all distributed partitions through the reduction
//!    channel. This is a blocking collective; every partition must call it
//!    with a structurally identical field set.
//! 4. **Fill and merge** — responses are filled from the store and
//!    independently computed responses are merged with
//!    [`Aggregator::aggregate_responses`].
//!
//! ## Parallel accumulation
//!
//! Within one pass the cell loop is pure summation, so
//! [`FunctionalAggregator::accumulate_parallel`] may run it on the rayon
//! pool: each worker folds a disjoint range of cells into its own partial
//! sum, partials are combined, and only the combined value touches the
//! store. The final per-field sum equals the serial sum up to
//! floating-point ordering.
//!
//! ## Contract violations
//!
//! Supplying a field-view count different from the store's slot count, or a
//! field view shorter than its batch, is a programming defect. The
//! accumulation routines panic with the counts involved rather than
//! returning an error; see the module docs of
//! [`error`](crate::response::error).

use std::marker::PhantomData;

use log::{debug, trace};
use rayon::prelude::*;

use crate::response::batch::{CellBatch, CellField};
use crate::response::comm::ReductionChannel;
use crate::response::config::AggregatorConfig;
use crate::response::data::ResponseData;
use crate::response::engine::{EvaluationEngine, EvaluationRequest};
use crate::response::error::{ConfigurationError, ReductionError};
use crate::response::params::AggregatorParams;
use crate::response::response::Response;
use crate::response::types::{Evaluation, FieldName, ResponseScalar};


/// Scalar element type of an evaluation variant.
pub type ScalarOf<E> = <E as Evaluation>::Scalar;

/// Capability set of a response aggregator for one evaluation variant.
///
/// Every operation is generic over the variant through [`Evaluation`]; the
/// only run-time variant dispatch in the pipeline lives in the builder.

pub trait Aggregator {
    /// Evaluation variant this aggregator serves.
    type Eval: Evaluation;

    /// Produces a new, independently configured aggregator.
    ///
    /// Used by the factory to stamp out instances without re-deriving
    /// construction parameters.
    fn clone_with(&self, config: AggregatorConfig) -> Self
    where
        Self: Sized;

    /// Allocates a fresh, zeroed data store for exactly `fields`.
    ///
    /// The returned store's field order matches the input order and aliases
    /// no other store.
    fn build_response_data(&self, fields: &[FieldName]) -> ResponseData<ScalarOf<Self::Eval>>;

    /// Registers an evaluation request covering the store's fields.
    ///
    /// Validates `params`, then asks the engine to schedule a scatter:
    /// for each pass of up to the workset size in cells, the engine will
    /// invoke [`accumulate`](Self::accumulate) with matching field views and
    /// treat the fields as required pass outputs. Mutates only the engine's
    /// schedule; the store is untouched until passes run.
    fn register_evaluation_request(
        &self,
        engine: &mut dyn EvaluationEngine,
        data: &ResponseData<ScalarOf<Self::Eval>>,
        params: &AggregatorParams,
    ) -> Result<(), ConfigurationError>;

    /// Sums every cell's contribution in the batch into the store.
    ///
    /// For each field index `i`, `accumulator[i] += Σ_cell field[i](cell)`.
    /// Purely additive and cell-order independent; repeated calls keep
    /// accumulating until the store is reinitialized.
    ///
    /// ## Panics
    /// Panics if `fields.len()` differs from the store's slot count, or if
    /// any field view holds fewer values than the batch has cells.
    fn accumulate(
        &self,
        batch: &CellBatch,
        data: &mut ResponseData<ScalarOf<Self::Eval>>,
        fields: &[CellField<ScalarOf<Self::Eval>>],
    );

    /// Combines each accumulator across all partitions of `channel`.
    ///
    /// A blocking collective: every partition must call this with a
    /// structurally identical field set. On success each local value has
    /// been replaced per the variant's combination rule. Communication
    /// failure is fatal to the cycle; no local recovery is attempted.
    fn global_reduce(
        &self,
        channel: &dyn ReductionChannel,
        data: &mut ResponseData<ScalarOf<Self::Eval>>,
    ) -> Result<(), ReductionError>;

    /// Folds `dest` and every source into `dest`.
    ///
    /// `dest`'s current value participates in the sum, so callers wanting a
    /// pure sum of sources seed `dest` with the additive identity. Empty
    /// `sources` leaves `dest` unchanged.
    fn aggregate_responses(
        &self,
        dest: &mut Response<ScalarOf<Self::Eval>>,
        sources: &[Response<ScalarOf<Self::Eval>>],
    );
}

/// Aggregator for integrated-functional responses.
///
/// Stateless with respect to per-run data: the only state is the shared
/// construction-time configuration, referenced across calls and never
/// owned per cycle.

pub struct FunctionalAggregator<E: Evaluation> {
    config: AggregatorConfig,
    _variant: PhantomData<E>,
}

impl<E: Evaluation> FunctionalAggregator<E> {
    /// Creates an aggregator carrying `config`.
    pub fn new(config: AggregatorConfig) -> Self {
        Self {
            config,
            _variant: PhantomData,
        }
    }

    /// Shared configuration this aggregator was constructed with.
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Parallel counterpart of [`Aggregator::accumulate`].
    ///
    /// Each rayon worker folds a disjoint cell range into a thread-local
    /// partial sum; partials are combined and the combined value is added to
    /// the accumulator. Same contract and same final sums as the serial
    /// path, up to floating-point summation order.
    ///
    /// ## Panics
    /// Same contract checks as [`Aggregator::accumulate`].
    pub fn accumulate_parallel(
        &self,
        batch: &CellBatch,
        data: &mut ResponseData<E::Scalar>,
        fields: &[CellField<E::Scalar>],
    ) {
        check_accumulation_contract(batch, data, fields);

        let num_cells = batch.num_cells();
        let partials: Vec<E::Scalar> = fields
            .par_iter()
            .map(|field| {
                (0..num_cells)
                    .into_par_iter()
                    .fold(E::Scalar::zero, |mut acc, cell| {
                        acc.accumulate(field.value(cell));
                        acc
                    })
                    .reduce(E::Scalar::zero, |mut lhs, rhs| {
                        lhs.accumulate(&rhs);
                        lhs
                    })
            })
            .collect();

        for (slot, partial) in data.accumulators_mut().iter_mut().zip(partials.iter()) {
            slot.accumulate(partial);
        }
    }
}

impl<E: Evaluation> Aggregator for FunctionalAggregator<E> {
    type Eval = E;

    fn clone_with(&self, config: AggregatorConfig) -> Self {
        Self::new(config)
    }

    fn build_response_data(&self, fields: &[FieldName]) -> ResponseData<E::Scalar> {
        let mut data = ResponseData::new();
        data.allocate(fields);

        trace!(
            "allocated {} response data store with {} fields",
            E::NAME,
            fields.len()
        );
        data
    }

    fn register_evaluation_request(
        &self,
        engine: &mut dyn EvaluationEngine,
        data: &ResponseData<E::Scalar>,
        params: &AggregatorParams,
    ) -> Result<(), ConfigurationError> {
        let workset_size = params.workset_size()?;

        debug!(
            "scheduling {} response scatter: {} fields, workset size {}",
            E::NAME,
            data.fields().len(),
            workset_size
        );

        engine.require_response_scatter(EvaluationRequest {
            fields: data.fields().to_vec(),
            workset_size,
            variant: E::TAG,
        });
        Ok(())
    }

    fn accumulate(
        &self,
        batch: &CellBatch,
        data: &mut ResponseData<E::Scalar>,
        fields: &[CellField<E::Scalar>],
    ) {
        check_accumulation_contract(batch, data, fields);

        for (slot, field) in data.accumulators_mut().iter_mut().zip(fields.iter()) {
            for cell in 0..batch.num_cells() {
                slot.accumulate(field.value(cell));
            }
        }
    }

    fn global_reduce(
        &self,
        channel: &dyn ReductionChannel,
        data: &mut ResponseData<E::Scalar>,
    ) -> Result<(), ReductionError> {
        trace!(
            "reducing {} response accumulators across {} partitions",
            data.accumulators().len(),
            channel.partition_count()
        );

        E::reduce(channel, data.accumulators_mut())
    }

    fn aggregate_responses(
        &self,
        dest: &mut Response<E::Scalar>,
        sources: &[Response<E::Scalar>],
    ) {
        let mut value = dest.value().clone();
        for source in sources {
            value.accumulate(source.value());
        }
        dest.set_value(value);
    }
}

/// Verifies the structural preconditions of one accumulation call.
///
/// Violations are programming defects; the evaluation cycle is aborted with
/// the counts involved.
fn check_accumulation_contract<S: ResponseScalar>(
    batch: &CellBatch,
    data: &ResponseData<S>,
    fields: &[CellField<S>],
) {
    let slots = data.accumulators().len();
    if fields.len() != slots {
        panic!(
            "response accumulation contract violated: {} field views supplied for {} accumulator slots",
            fields.len(),
            slots
        );
    }

    for field in fields {
        if field.len() < batch.num_cells() {
            panic!(
                "response accumulation contract violated: field \"{}\" supplies {} cell values for a {}-cell batch",
                field.name(),
                field.len(),
                batch.num_cells()
            );
        }
    }
}
