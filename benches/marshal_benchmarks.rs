//! Benchmarks for argument marshalling and native invocation.
//!
//! ```bash
//! cargo bench --bench marshal_benchmarks
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use scriptext::prelude::*;
use scriptext::{ResultSlot, RetainedObjects, marshal_args, math, text};

fn bench_marshal(c: &mut Criterion) {
    let mut group = c.benchmark_group("marshal_args");

    for count in [1usize, 4, 16] {
        let params = vec![ValueKind::UInt32; count];
        let actual: Vec<_> = (0..count).map(|i| EngineValue::Number(i as f64 - 0.5)).collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| marshal_args("f", black_box(&params), black_box(&actual)))
        });
    }

    group.finish();
}

fn bench_invoke(c: &mut Criterion) {
    let results = ResultSlot::new();
    let mut registry = ExtensionRegistry::new();
    let index = registry.register(math::extension(&results)).unwrap();
    let hash = SymbolHash::from_function(
        math::NAME,
        "add",
        &[ValueKind::UInt32, ValueKind::UInt32],
    );
    let heap = ManagedHeap::new();
    let args = [EngineValue::Number(2.0), EngineValue::Number(3.0)];

    c.bench_function("call_by_index", |b| {
        b.iter(|| registry.call(index, black_box("add"), black_box(&args), &heap))
    });
    c.bench_function("call_by_hash", |b| {
        b.iter(|| registry.call_by_hash(black_box(hash), black_box(&args), &heap))
    });
}

fn bench_strings(c: &mut Criterion) {
    let results = ResultSlot::new();
    let ext = text::extension(&results, &RetainedObjects::new());
    let upper = ext.function("upper").unwrap();

    let mut heap = ManagedHeap::new();
    let short = heap.alloc_string("hello");
    let long = heap.alloc_string("x".repeat(4096));

    let mut group = c.benchmark_group("upper");
    for (name, handle) in [("short", short), ("long", long)] {
        group.bench_function(name, |b| {
            b.iter(|| upper.invoke(black_box(&[EngineValue::String(handle)]), &heap))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_marshal, bench_invoke, bench_strings);
criterion_main!(benches);
