// SPDX-License-Identifier: PMPL-1.0-or-later
//! Performance benchmarks for the filter adapter

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

use adhoc_filter::{
    find_matching_filter_key, AdapterConfig, AdhocColumn, Clause, FilterAdapter, FilterClause,
    FilterDataMapping, FilterDescriptor, SequenceTokenSource,
};
use adhoc_sql::{translate_to_sql, OperatorId, Operation, SimpleExpression, SqlContext};

// ============================================================================
// Operator Table Benchmarks
// ============================================================================

fn bench_operator_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("operators");
    group.throughput(Throughput::Elements(Operation::ALL.len() as u64));

    group.bench_function("inverse_map", |b| {
        b.iter(|| {
            for op in Operation::ALL {
                black_box(OperatorId::from_operation(black_box(op)));
            }
        });
    });

    group.bench_function("linear_scan", |b| {
        b.iter(|| {
            for op in Operation::ALL {
                black_box(
                    OperatorId::ALL
                        .into_iter()
                        .find(|id| id.descriptor().operation == black_box(op)),
                );
            }
        });
    });

    group.finish();
}

// ============================================================================
// Matching Benchmarks
// ============================================================================

fn mapping_with_layers(layers: usize) -> FilterDataMapping {
    let mut mapping = FilterDataMapping::new();
    for i in 0..layers {
        let filters = [
            FilterDescriptor::new(format!("col_{}", i), Operation::Eq, Some(json!(i))),
            FilterDescriptor::new("country", Operation::In, Some(json!(["FR", format!("X{}", i)]))),
        ];
        mapping.insert(format!("layer_{}", i), &filters).unwrap();
    }
    mapping
}

fn bench_find_matching_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");

    for layers in [1usize, 16, 128].iter() {
        group.bench_with_input(BenchmarkId::new("last_layer", layers), layers, |b, &layers| {
            let target = layers - 1;
            let clause = FilterClause::new("country", Operation::In)
                .with_val(json!(["FR", format!("X{}", target)]))
                .with_filter_data_mapping(mapping_with_layers(layers));
            b.iter(|| black_box(find_matching_filter_key(black_box(&clause))));
        });
    }

    group.finish();
}

// ============================================================================
// Conversion Benchmarks
// ============================================================================

fn bench_convert(c: &mut Criterion) {
    let adapter = FilterAdapter::with_token_source(
        AdapterConfig::default(),
        SequenceTokenSource::new(["abc", "def"]),
    )
    .unwrap();
    let random = FilterAdapter::default();
    let mut group = c.benchmark_group("convert");

    let simple = FilterClause::new("region", Operation::Eq).with_val("US");
    group.bench_function("simple", |b| {
        b.iter(|| black_box(adapter.simple_filter_to_adhoc(black_box(&simple), Clause::Where)));
    });

    let computed = FilterClause::new(AdhocColumn::new("extract(year from ts)"), Operation::In)
        .with_val(json!([2019, 2020, 2021]));
    group.bench_function("computed_column", |b| {
        b.iter(|| black_box(adapter.simple_filter_to_adhoc(black_box(&computed), Clause::Where)));
    });

    let extra = FilterClause::new("region", Operation::Eq)
        .with_val("US")
        .extra()
        .with_filter_data_mapping(mapping_with_layers(16));
    group.bench_function("extra_random_tokens", |b| {
        b.iter(|| black_box(random.simple_filter_to_adhoc(black_box(&extra), Clause::Where)));
    });

    group.finish();
}

fn bench_translate(c: &mut Criterion) {
    let ctx = SqlContext::default();
    let mut group = c.benchmark_group("translate");

    for len in [1usize, 10, 100].iter() {
        group.bench_with_input(BenchmarkId::new("in_list", len), len, |b, &len| {
            let values: Vec<String> = (0..len).map(|i| format!("value'{}", i)).collect();
            let expr = SimpleExpression {
                subject: "(name)".to_string(),
                operator: Some(Operation::In),
                comparator: Some(json!(values)),
            };
            b.iter(|| black_box(translate_to_sql(black_box(&expr), &ctx)));
        });
    }

    group.finish();
}

criterion_group!(operator_benches, bench_operator_lookup);

criterion_group!(matching_benches, bench_find_matching_key);

criterion_group!(convert_benches, bench_convert, bench_translate);

criterion_main!(operator_benches, matching_benches, convert_benches);
