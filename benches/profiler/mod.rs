// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub fn criterion() -> Criterion {
    let frequency = env_or("PROFILE_FREQ", 100i32).clamp(1, 1000);
    let sample_size = env_or("BENCH_SAMPLE_SIZE", 60usize).clamp(10, 200);
    let measurement_secs = env_or("BENCH_MEASUREMENT_SECS", 5u64).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .measurement_time(Duration::from_secs(measurement_secs))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
