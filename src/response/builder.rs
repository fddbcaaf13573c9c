//! Aggregator builder and variant dispatch.
//!
//! The builder holds the shared configuration every aggregator needs at
//! construction time and maps an [`EvaluationTag`] to a concrete, correctly
//! typed aggregator. This is the **single run-time variant dispatch point**
//! in the pipeline; everything downstream is variant-generic through type
//! parameters.

use std::sync::Arc;

use crate::response::aggregator::FunctionalAggregator;
use crate::response::config::{AggregatorConfig, GlobalIndexer, LinearObjectFactory};
use crate::response::error::{BuilderError, ConfigurationError, UnsupportedVariantError};
use crate::response::types::{
    Evaluation, EvaluationTag, ExpansionEvaluation, ValueEvaluation,
};


/// Name of the global indexer configuration slot, used in diagnostics.
const GLOBAL_INDEXER: &str = "Global Indexer";

/// Name of the linear-object factory configuration slot, used in
/// diagnostics.
const LINEAR_OBJECT_FACTORY: &str = "Linear Object Factory";

/// Factory for functional response aggregators.
///
/// Holds shared handles to the global indexer and the linear-object
/// factory. Both are externally owned; the builder neither constructs nor
/// destroys them, it only wires them into the aggregators it builds.
///
/// ## Example
/// ```ignore
/// let mut builder = AggregatorBuilder::new();
/// builder.set_global_indexer(indexer);
/// builder.set_linear_object_factory(factory);
///
/// let aggregator = builder.build(EvaluationTag::Value)?;
/// ```

#[derive(Clone, Default)]
pub struct AggregatorBuilder {
    global_indexer: Option<Arc<dyn GlobalIndexer>>,
    linear_object_factory: Option<Arc<dyn LinearObjectFactory>>,
}

impl AggregatorBuilder {
    /// Creates a builder with no configuration set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies the shared global indexer handle.
    pub fn set_global_indexer(&mut self, indexer: Arc<dyn GlobalIndexer>) {
        self.global_indexer = Some(indexer);
    }

    /// Supplies the shared linear-object factory handle.
    pub fn set_linear_object_factory(&mut self, factory: Arc<dyn LinearObjectFactory>) {
        self.linear_object_factory = Some(factory);
    }

    /// Returns the held global indexer handle, if set.
    pub fn global_indexer(&self) -> Option<&Arc<dyn GlobalIndexer>> {
        self.global_indexer.as_ref()
    }

    /// Returns the held linear-object factory handle, if set.
    pub fn linear_object_factory(&self) -> Option<&Arc<dyn LinearObjectFactory>> {
        self.linear_object_factory.as_ref()
    }

    /// Assembles the construction-time configuration from the held handles.
    fn config(&self) -> Result<AggregatorConfig, ConfigurationError> {
        let global_indexer = self
            .global_indexer
            .clone()
            .ok_or(ConfigurationError::MissingParameter {
                name: GLOBAL_INDEXER,
            })?;

        let linear_object_factory =
            self.linear_object_factory
                .clone()
                .ok_or(ConfigurationError::MissingParameter {
                    name: LINEAR_OBJECT_FACTORY,
                })?;

        Ok(AggregatorConfig::new(global_indexer, linear_object_factory))
    }

    /// Builds the aggregator for a statically known variant.
    pub fn build_typed<E: Evaluation>(
        &self,
    ) -> Result<FunctionalAggregator<E>, ConfigurationError> {
        Ok(FunctionalAggregator::new(self.config()?))
    }

    /// Builds the aggregator for a dynamically chosen variant.
    ///
    /// Tags without a functional aggregator implementation fail with
    /// [`UnsupportedVariantError`]; incomplete builder configuration fails
    /// with [`ConfigurationError`]. Never silently defaults to another
    /// variant.
    pub fn build(&self, tag: EvaluationTag) -> Result<BuiltAggregator, BuilderError> {
        match tag {
            EvaluationTag::Value => Ok(BuiltAggregator::Value(self.build_typed()?)),
            EvaluationTag::Expansion => Ok(BuiltAggregator::Expansion(self.build_typed()?)),
            EvaluationTag::Gradient => Err(UnsupportedVariantError { tag }.into()),
        }
    }
}

/// A concrete aggregator produced by tag dispatch.
///
/// Carrying the typed aggregators in an enum keeps downstream code free of
/// runtime type recovery: callers match once and work with the fully typed
/// instance from then on.

pub enum BuiltAggregator {
    /// Aggregator for the plain scalar variant.
    Value(FunctionalAggregator<ValueEvaluation>),

    /// Aggregator for the expansion-valued variant.
    Expansion(FunctionalAggregator<ExpansionEvaluation>),
}

impl BuiltAggregator {
    /// Tag of the variant this aggregator serves.
    pub fn tag(&self) -> EvaluationTag {
        match self {
            BuiltAggregator::Value(_) => ValueEvaluation::TAG,
            BuiltAggregator::Expansion(_) => ExpansionEvaluation::TAG,
        }
    }
}
