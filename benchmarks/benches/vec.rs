// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use rampart_vec::RampartVec;

// Fast mode: FAST_BENCH=1 cargo bench -p benchmarks --bench vec
fn is_fast_mode() -> bool {
    std::env::var("FAST_BENCH")
        .map(|v| v == "1")
        .unwrap_or(false)
}

fn configure_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    if is_fast_mode() {
        group.measurement_time(std::time::Duration::from_millis(500));
        group.sample_size(10);
    } else {
        group.measurement_time(std::time::Duration::from_secs(3));
        group.sample_size(50);
    }
}

fn row(i: usize, n: usize) -> RampartVec<i32> {
    let mut row = RampartVec::new();
    for j in 0..n {
        row.push((2 * i + 3 * j) as i32).expect("Failed to push");
    }
    row
}

fn nested(n: usize) -> RampartVec<RampartVec<i32>> {
    let mut outer = RampartVec::new();
    for i in 0..n {
        outer.push(row(i + 1, n)).expect("Failed to push");
    }
    outer
}

// =============================================================================
// Nested vectors: move construction and move assignment
// =============================================================================

fn bench_nested_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_push");
    configure_group(&mut group);

    for size in [100, 500, 1_000] {
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &n| {
            b.iter(|| {
                let mut outer = Vec::new();
                for i in 0..n {
                    let mut row = Vec::new();
                    for j in 0..n {
                        row.push((2 * i + 3 * j) as i32);
                    }
                    outer.push(row);
                }
                black_box(outer)
            });
        });

        group.bench_with_input(BenchmarkId::new("RampartVec", size), &size, |b, &n| {
            b.iter(|| {
                let mut outer = RampartVec::new();
                for i in 0..n {
                    outer.push(row(i, n)).expect("Failed to push");
                }
                black_box(outer)
            });
        });
    }

    group.finish();
}

fn bench_nested_transfer_from(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_transfer_from");
    configure_group(&mut group);

    for size in [100, 500, 1_000] {
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &n| {
            b.iter(|| {
                let mut outer: Vec<Vec<i32>> = Vec::new();
                for i in 0..n {
                    let row: Vec<i32> = (0..n).map(|j| (2 * i + 3 * j) as i32).collect();
                    outer.push(Vec::new());
                    if let Some(last) = outer.last_mut() {
                        *last = row;
                    }
                }
                black_box(outer)
            });
        });

        group.bench_with_input(BenchmarkId::new("RampartVec", size), &size, |b, &n| {
            b.iter(|| {
                let mut outer = RampartVec::new();
                for i in 0..n {
                    let mut row = row(i, n);
                    outer.push(RampartVec::new()).expect("Failed to push");
                    if let Some(last) = outer.back_mut() {
                        last.transfer_from(&mut row);
                    }
                }
                black_box(outer)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Front insertion into a vector of vectors
// =============================================================================

fn bench_insert_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_front");
    configure_group(&mut group);

    for size in [100, 500, 1_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &n| {
            b.iter_batched(
                || {
                    let outer: Vec<Vec<i32>> = (0..n)
                        .map(|i| (0..n).map(|j| (2 * (i + 1) + 3 * j) as i32).collect())
                        .collect();
                    let temp: Vec<i32> = (0..n).map(|i| (3 * i) as i32).collect();
                    (outer, temp)
                },
                |(mut outer, temp)| {
                    outer.insert(0, temp.clone());
                    black_box(outer)
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("RampartVec", size), &size, |b, &n| {
            b.iter_batched(
                || {
                    let mut temp = RampartVec::new();
                    for i in 0..n {
                        temp.push((3 * i) as i32).expect("Failed to push");
                    }
                    (nested(n), temp)
                },
                |(mut outer, temp)| {
                    outer.insert_copy(0, &temp).expect("Failed to insert");
                    black_box(outer)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Bulk erase
// =============================================================================

fn bench_erase_range(c: &mut Criterion) {
    const KEEP: usize = 100;

    let mut group = c.benchmark_group("erase_range");
    configure_group(&mut group);

    for size in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &n| {
            let mut vec = Vec::with_capacity(n);
            b.iter(|| {
                vec.extend(0..n as i32);
                vec.drain(KEEP..n - KEEP);
                black_box(&vec);
                vec.clear();
            });
        });

        group.bench_with_input(BenchmarkId::new("RampartVec", size), &size, |b, &n| {
            let mut vec = RampartVec::try_with_capacity(n).expect("Failed to allocate");
            b.iter(|| {
                for j in 0..n as i32 {
                    vec.push(j).expect("Failed to push");
                }
                let next = vec.erase_range(KEEP..n - KEEP);
                black_box((next, &vec));
                vec.clear();
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_nested_push,
    bench_nested_transfer_from,
    bench_insert_front,
    bench_erase_range
);
criterion_main!(benches);
