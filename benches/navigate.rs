// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use triton::label::{relabel, LabelStore};
use triton::query::{find_by_label, navigate, parse_label, Direction};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group name in this file: `query.navigate`
// - Case IDs must remain stable across refactors (e.g. `directional_1000`,
//   `label_lookup_1000`).
fn benches_navigate(c: &mut Criterion) {
    let mut group = c.benchmark_group("query.navigate");

    let ws = fixtures::grid_workspace(100, 10);
    let origin = fixtures::block_id("s0050_b0005");

    group.throughput(Throughput::Elements(1000));
    group.bench_function("directional_1000", |b| {
        b.iter(|| {
            let mut found = 0usize;
            for direction in [
                Direction::Left,
                Direction::Right,
                Direction::Up,
                Direction::Down,
            ] {
                if navigate(black_box(&ws), &origin, direction).is_some() {
                    found += 1;
                }
            }
            black_box(found)
        })
    });

    let mut store = LabelStore::new();
    relabel(&ws, &mut store);
    let query = parse_label("CV7").expect("label query");
    group.bench_function("label_lookup_1000", |b| {
        b.iter(|| black_box(find_by_label(black_box(&ws), &store, &query)))
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_navigate
}
criterion_main!(benches);
