// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use triton::label::{relabel, LabelStore};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group name in this file: `label.relabel`
// - Case IDs must remain stable across refactors so results stay comparable
//   over time (e.g. `cold_20x10`, `warm_20x10`, `cold_200x5`).
fn checksum_store(store: &LabelStore) -> u64 {
    let mut acc = 0u64;
    for (block_id, name) in store.stack_names() {
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(block_id.as_str().len() as u64)
            .wrapping_add(name.as_str().len() as u64);
    }
    acc
}

fn benches_relabel(c: &mut Criterion) {
    let mut group = c.benchmark_group("label.relabel");

    let small = fixtures::grid_workspace(20, 10);
    group.throughput(Throughput::Elements(200));
    group.bench_function("cold_20x10", |b| {
        b.iter_batched(
            LabelStore::new,
            |mut store| {
                relabel(black_box(&small), &mut store);
                black_box(checksum_store(&store))
            },
            BatchSize::SmallInput,
        )
    });

    let mut warm_store = LabelStore::new();
    relabel(&small, &mut warm_store);
    group.bench_function("warm_20x10", |b| {
        b.iter_batched(
            || warm_store.clone(),
            |mut store| {
                relabel(black_box(&small), &mut store);
                black_box(checksum_store(&store))
            },
            BatchSize::SmallInput,
        )
    });

    let wide = fixtures::grid_workspace(200, 5);
    group.throughput(Throughput::Elements(1000));
    group.bench_function("cold_200x5", |b| {
        b.iter_batched(
            LabelStore::new,
            |mut store| {
                relabel(black_box(&wide), &mut store);
                black_box(checksum_store(&store))
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_relabel
}
criterion_main!(benches);
