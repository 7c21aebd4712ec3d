//! Micro-operation benchmarks for the indexed heap and its containers.
//!
//! Run with: `cargo bench --bench heap_ops`
//!
//! Measures per-operation latency for add, poll, and change_priority on the
//! heap, plus put/get on the chained map that backs its value index.

use std::hint::black_box;
use std::time::Instant;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use heapkit::ds::{ChainedHashMap, DynamicArray, IndexedMinHeap};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 3] = [1_024, 16_384, 131_072];
const OPS: u64 = 10_000;

fn random_priorities(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random::<u64>() % 1_000_000).collect()
}

fn filled_heap(priorities: &[u64]) -> IndexedMinHeap<u64, u64> {
    let mut heap = IndexedMinHeap::with_capacity(priorities.len(), priorities.len());
    for (value, &priority) in priorities.iter().enumerate() {
        let _ = heap.add(value as u64, priority);
    }
    heap
}

// ============================================================================
// Heap
// ============================================================================

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap_add");
    for &size in &SIZES {
        let priorities = random_priorities(size, 42);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &priorities, |b, p| {
            b.iter(|| black_box(filled_heap(p)))
        });
    }
    group.finish();
}

fn bench_poll(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap_poll_all");
    for &size in &SIZES {
        let priorities = random_priorities(size, 7);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &priorities, |b, p| {
            b.iter_custom(|iters| {
                let mut elapsed = std::time::Duration::ZERO;
                for _ in 0..iters {
                    let mut heap = filled_heap(p);
                    let start = Instant::now();
                    while let Ok(value) = heap.poll() {
                        black_box(value);
                    }
                    elapsed += start.elapsed();
                }
                elapsed
            })
        });
    }
    group.finish();
}

fn bench_change_priority(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap_change_priority_ns");
    group.throughput(Throughput::Elements(OPS));
    for &size in &SIZES {
        let priorities = random_priorities(size, 99);
        group.bench_with_input(BenchmarkId::from_parameter(size), &priorities, |b, p| {
            b.iter_custom(|iters| {
                let mut heap = filled_heap(p);
                let mut rng = SmallRng::seed_from_u64(1234);
                let start = Instant::now();
                for _ in 0..iters {
                    for _ in 0..OPS {
                        let value = rng.random::<u64>() % size as u64;
                        let priority = rng.random::<u64>() % 1_000_000;
                        let _ = black_box(heap.change_priority(&value, priority));
                    }
                }
                start.elapsed()
            })
        });
    }
    group.finish();
}

// ============================================================================
// Containers
// ============================================================================

fn bench_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("chained_map");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("put_from_default_capacity", |b| {
        b.iter(|| {
            let mut map = ChainedHashMap::new();
            for i in 0..OPS {
                map.put(i, i);
            }
            black_box(map.len())
        })
    });

    group.bench_function("get_hit", |b| {
        let mut map = ChainedHashMap::new();
        for i in 0..OPS {
            map.put(i, i);
        }
        b.iter(|| {
            for i in 0..OPS {
                black_box(map.get(&i));
            }
        })
    });

    group.finish();
}

fn bench_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("dynamic_array");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("append_then_pop", |b| {
        b.iter(|| {
            let mut array = DynamicArray::new();
            for i in 0..OPS {
                array.append(i);
            }
            while let Ok(value) = array.pop() {
                black_box(value);
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_add,
    bench_poll,
    bench_change_priority,
    bench_map,
    bench_array
);
criterion_main!(benches);
