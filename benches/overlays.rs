// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use intrasearch::model::HighlightId;
use intrasearch::render::text::result_lines;
use intrasearch::render::HighlightRenderer;

mod fixtures;
mod profiler;

use fixtures::{Case, FixedViewport};

// Benchmark identity (keep stable):
// - Group names in this file: `render.overlays`, `render.result_lines`.
// - Case IDs are the fixture case ids (`small`, `medium`, `large`).
fn benches_overlays(c: &mut Criterion) {
    let viewport = FixedViewport::default();

    let mut group = c.benchmark_group("render.overlays");
    for case in [Case::Small, Case::Medium, Case::Large] {
        let highlights = fixtures::ranked(case);
        let focused = HighlightId::new("r00003").expect("highlight id");
        let editing = HighlightId::new("r00006").expect("highlight id");
        let renderer = HighlightRenderer::new(Some(&focused), Some(&editing));
        group.bench_function(case.id(), |b| {
            b.iter(|| {
                let overlays = renderer.overlays(black_box(&highlights), &viewport);
                black_box(overlays.iter().map(|o| o.rects().len()).sum::<usize>())
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("render.result_lines");
    for case in [Case::Small, Case::Medium, Case::Large] {
        let highlights = fixtures::ranked(case);
        group.bench_function(case.id(), |b| {
            b.iter(|| black_box(result_lines(black_box(&highlights)).len()))
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_overlays
}

criterion_main!(benches);
