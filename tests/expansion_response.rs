use std::sync::Arc;

use response_aggregation::prelude::*;
use response_aggregation::{
    ExpansionValue, GlobalIndex, GlobalIndexer, LinearObjectFactory, LocalIndex, RealType,
    ReductionChannel, ReductionError,
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

/// Channel that fails loudly if any collective is attempted.
struct ForbiddenChannel;

impl ReductionChannel for ForbiddenChannel {
    fn partition_count(&self) -> usize {
        2
    }

    fn sum_all(&self, _local: &[RealType], _global: &mut [RealType]) -> Result<(), ReductionError> {
        panic!("the expansion variant must not invoke the reduction collective");
    }
}

fn make_builder() -> AggregatorBuilder {
    let mut builder = AggregatorBuilder::new();
    builder.set_global_indexer(Arc::new(BlockIndexer { owned: 16 }));
    builder.set_linear_object_factory(Arc::new(FixedShapeFactory { length: 16 }));
    builder
}

fn make_aggregator() -> FunctionalAggregator<ExpansionEvaluation> {
    make_builder()
        .build_typed::<ExpansionEvaluation>()
        .expect("builder holds a complete configuration")
}

fn field_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn expansion_accumulation_sums_coefficientwise() {
    let aggregator = make_aggregator();
    let mut data = aggregator.build_response_data(&field_names(&["energy"]));

    let fields = vec![CellField::new(
        "energy",
        vec![
            ExpansionValue::new(vec![1.0, 0.5]),
            ExpansionValue::new(vec![2.0, 0.25]),
        ],
    )];
    aggregator.accumulate(&CellBatch::new(2), &mut data, &fields);

    assert_eq!(
        data.accumulators()[0].coefficients(),
        &[3.0, 0.75],
        "per-cell expansions must sum coefficient-wise"
    );
    assert_eq!(data.accumulators()[0].mean(), 3.0);
}

#[test]
fn expansion_accumulation_zero_pads_shorter_operands() {
    let aggregator = make_aggregator();
    let mut data = aggregator.build_response_data(&field_names(&["energy"]));

    aggregator.accumulate(
        &CellBatch::new(1),
        &mut data,
        &[CellField::new(
            "energy",
            vec![ExpansionValue::new(vec![1.0, 2.0])],
        )],
    );
    aggregator.accumulate(
        &CellBatch::new(1),
        &mut data,
        &[CellField::new(
            "energy",
            vec![ExpansionValue::new(vec![1.0, 2.0, 3.0])],
        )],
    );

    assert_eq!(
        data.accumulators()[0].coefficients(),
        &[2.0, 4.0, 3.0],
        "a longer contribution must grow the accumulator, padding with zero"
    );
}

#[test]
fn expansion_global_reduce_leaves_local_values() {
    let aggregator = make_aggregator();
    let mut data = aggregator.build_response_data(&field_names(&["energy"]));

    aggregator.accumulate(
        &CellBatch::new(1),
        &mut data,
        &[CellField::new(
            "energy",
            vec![ExpansionValue::new(vec![4.0, 1.0])],
        )],
    );

    // ForbiddenChannel panics on any collective; the expansion variant's
    // reduction must never reach it.
    aggregator
        .global_reduce(&ForbiddenChannel, &mut data)
        .expect("the expansion reduction must succeed without communicating");

    assert_eq!(
        data.accumulators()[0].coefficients(),
        &[4.0, 1.0],
        "expansion coefficients must be left untouched by the reduction"
    );
}

#[test]
fn expansion_reinitialize_keeps_term_count() {
    let aggregator = make_aggregator();
    let mut data = aggregator.build_response_data(&field_names(&["energy"]));

    aggregator.accumulate(
        &CellBatch::new(1),
        &mut data,
        &[CellField::new(
            "energy",
            vec![ExpansionValue::new(vec![1.0, 2.0, 3.0])],
        )],
    );

    data.reinitialize();

    let accumulator = &data.accumulators()[0];
    assert_eq!(
        accumulator.terms(),
        3,
        "reinitialization must zero in place, not reallocate"
    );
    assert!(accumulator.coefficients().iter().all(|&c| c == 0.0));
}

#[test]
fn expansion_aggregate_responses_merges_coefficientwise() {
    let aggregator = make_aggregator();

    let sources = vec![
        Response::with_value("r1", ExpansionValue::new(vec![2.0])),
        Response::with_value("r2", ExpansionValue::new(vec![3.0, 1.0])),
        Response::with_value("r3", ExpansionValue::new(vec![5.0, 1.0, 0.5])),
    ];

    let mut dest = Response::new("total");
    aggregator.aggregate_responses(&mut dest, &sources);
    assert_eq!(dest.value().coefficients(), &[10.0, 2.0, 0.5]);

    aggregator.aggregate_responses(&mut dest, &[]);
    assert_eq!(
        dest.value().coefficients(),
        &[10.0, 2.0, 0.5],
        "empty sources must leave the destination unchanged"
    );
}

#[test]
fn expansion_fill_copies_value_out() {
    let aggregator = make_aggregator();
    let mut data = aggregator.build_response_data(&field_names(&["energy"]));

    aggregator.accumulate(
        &CellBatch::new(1),
        &mut data,
        &[CellField::new(
            "energy",
            vec![ExpansionValue::new(vec![6.0, -1.0])],
        )],
    );

    let mut response = Response::new("energy");
    data.fill_response("energy", &mut response)
        .expect("energy is an allocated field");
    assert_eq!(response.value().coefficients(), &[6.0, -1.0]);

    // The response holds a copy; mutating the store afterwards must not
    // change it.
    data.reinitialize();
    assert_eq!(response.value().coefficients(), &[6.0, -1.0]);
}

#[test]
fn variants_from_one_builder_stay_isolated() {
    let builder = make_builder();

    let value_aggregator = builder
        .build_typed::<ValueEvaluation>()
        .expect("builder holds a complete configuration");
    let expansion_aggregator = builder
        .build_typed::<ExpansionEvaluation>()
        .expect("builder holds a complete configuration");

    let mut value_data = value_aggregator.build_response_data(&field_names(&["q"]));
    let mut expansion_data = expansion_aggregator.build_response_data(&field_names(&["q"]));

    value_aggregator.accumulate(
        &CellBatch::new(1),
        &mut value_data,
        &[CellField::new("q", vec![2.0])],
    );
    expansion_aggregator.accumulate(
        &CellBatch::new(1),
        &mut expansion_data,
        &[CellField::new(
            "q",
            vec![ExpansionValue::new(vec![9.0, 9.0])],
        )],
    );

    assert_eq!(value_data.accumulators(), &[2.0]);
    assert_eq!(expansion_data.accumulators()[0].coefficients(), &[9.0, 9.0]);
}
