use std::sync::Arc;

use response_aggregation::prelude::*;
use response_aggregation::{
    BuilderError, BuiltAggregator, ConfigurationError, GlobalIndex, GlobalIndexer,
    LinearObjectFactory, LocalIndex, UnsupportedVariantError,
};

struct BlockIndexer {
    owned: usize,
}

impl GlobalIndexer for BlockIndexer {
    fn owned_count(&self) -> usize {
        self.owned
    }

    fn global_index(&self, local: LocalIndex) -> Option<GlobalIndex> {
        (local < self.owned).then(|| local as GlobalIndex)
    }
}

struct FixedShapeFactory {
    length: usize,
}

impl LinearObjectFactory for FixedShapeFactory {
    fn vector_length(&self) -> usize {
        self.length
    }
}

fn make_builder() -> AggregatorBuilder {
    let mut builder = AggregatorBuilder::new();
    builder.set_global_indexer(Arc::new(BlockIndexer { owned: 8 }));
    builder.set_linear_object_factory(Arc::new(FixedShapeFactory { length: 8 }));
    builder
}

#[test]
fn builder_builds_supported_variants() {
    let builder = make_builder();

    let value = builder
        .build(EvaluationTag::Value)
        .expect("the value variant is supported");
    assert_eq!(value.tag(), EvaluationTag::Value);

    let expansion = builder
        .build(EvaluationTag::Expansion)
        .expect("the expansion variant is supported");
    assert_eq!(expansion.tag(), EvaluationTag::Expansion);
}

#[test]
fn gradient_variant_is_unsupported() {
    let builder = make_builder();

    let err = builder
        .build(EvaluationTag::Gradient)
        .err()
        .expect("no functional aggregator exists for the gradient variant");

    assert_eq!(
        err,
        BuilderError::UnsupportedVariant(UnsupportedVariantError {
            tag: EvaluationTag::Gradient,
        })
    );
}

#[test]
fn unconfigured_builder_fails_with_configuration_error() {
    let builder = AggregatorBuilder::new();
    let err = builder
        .build(EvaluationTag::Value)
        .err()
        .expect("an unconfigured builder must not build");
    assert!(matches!(
        err,
        BuilderError::Configuration(ConfigurationError::MissingParameter {
            name: "Global Indexer",
        })
    ));

    // With only the indexer set, the factory is the missing piece.
    let mut builder = AggregatorBuilder::new();
    builder.set_global_indexer(Arc::new(BlockIndexer { owned: 8 }));
    let err = builder
        .build(EvaluationTag::Value)
        .err()
        .expect("a half-configured builder must not build");
    assert!(matches!(
        err,
        BuilderError::Configuration(ConfigurationError::MissingParameter {
            name: "Linear Object Factory",
        })
    ));
}

#[test]
fn builder_exposes_held_handles() {
    let indexer: Arc<dyn GlobalIndexer> = Arc::new(BlockIndexer { owned: 8 });
    let factory: Arc<dyn LinearObjectFactory> = Arc::new(FixedShapeFactory { length: 8 });

    let mut builder = AggregatorBuilder::new();
    assert!(builder.global_indexer().is_none());
    assert!(builder.linear_object_factory().is_none());

    builder.set_global_indexer(indexer.clone());
    builder.set_linear_object_factory(factory.clone());

    let held = builder
        .global_indexer()
        .expect("the indexer handle was just set");
    assert!(Arc::ptr_eq(held, &indexer));

    let held = builder
        .linear_object_factory()
        .expect("the factory handle was just set");
    assert!(Arc::ptr_eq(held, &factory));
}

#[test]
fn built_aggregator_dispatch_is_fully_typed() {
    let builder = make_builder();

    match builder
        .build(EvaluationTag::Value)
        .expect("the value variant is supported")
    {
        BuiltAggregator::Value(aggregator) => {
            let data = aggregator.build_response_data(&["lift".to_string()]);
            assert_eq!(data.accumulators(), &[0.0]);
        }
        BuiltAggregator::Expansion(_) => {
            panic!("a value tag must never dispatch to the expansion variant")
        }
    }
}

#[test]
fn clone_with_produces_independent_aggregator() {
    let builder = make_builder();
    let aggregator = builder
        .build_typed::<ValueEvaluation>()
        .expect("builder holds a complete configuration");

    let clone = aggregator.clone_with(aggregator.config().clone());

    // The clone works against its own stores; nothing is shared per run.
    let mut original_data = aggregator.build_response_data(&["q".to_string()]);
    let mut cloned_data = clone.build_response_data(&["q".to_string()]);

    aggregator.accumulate(
        &CellBatch::new(1),
        &mut original_data,
        &[CellField::new("q", vec![1.0])],
    );
    clone.accumulate(
        &CellBatch::new(1),
        &mut cloned_data,
        &[CellField::new("q", vec![10.0])],
    );

    assert_eq!(original_data.accumulators(), &[1.0]);
    assert_eq!(cloned_data.accumulators(), &[10.0]);
}
