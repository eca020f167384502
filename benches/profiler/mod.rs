// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

/// Reads a numeric knob from the environment; unset or unparsable falls back to `default`.
fn env_knob<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<T>().ok()).unwrap_or(default)
}

/// Criterion tuned by `PROFILE_FREQ`, `BENCH_SAMPLE_SIZE`, `BENCH_WARMUP_SECS` and
/// `BENCH_MEASUREMENT_SECS`, with a flamegraph profiler attached.
pub fn criterion() -> Criterion {
    let frequency = env_knob::<i32>("PROFILE_FREQ", 100).clamp(1, 1000);
    let sample_size = env_knob::<usize>("BENCH_SAMPLE_SIZE", 50).clamp(10, 200);
    let warmup = env_knob::<u64>("BENCH_WARMUP_SECS", 2).clamp(1, 60);
    let measurement = env_knob::<u64>("BENCH_MEASUREMENT_SECS", 4).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup))
        .measurement_time(Duration::from_secs(measurement))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
