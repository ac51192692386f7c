// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Benchmarks for candidate generation, branch and bound, and canonicalization.

use conference_search::candidates::generate_candidates;
use conference_search::design::create_root_three;
use conference_search::filter::{CandidateFilterChain, FilterConfig};
use conference_search::graph::{reduce_conference, NautyOracle};
use conference_search::search::{BranchAndBound, BranchConfig, BranchStack};
use conference_search::{ConferenceType, DesignParameters, IsomorphismType, Statistics};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidates");
    for n in [12, 16, 20] {
        group.bench_with_input(BenchmarkId::new("generate", n), &n, |b, &n| {
            b.iter(|| {
                (2..n)
                    .map(|kz| generate_candidates(black_box(n), kz).map_or(0, |v| v.len()))
                    .sum::<usize>()
            })
        });
    }
    group.finish();
}

fn bench_branch_and_bound(c: &mut Criterion) {
    let mut group = c.benchmark_group("branch_and_bound");
    for n in [10, 12] {
        let params = DesignParameters::with_options(
            n,
            3,
            ConferenceType::Double,
            IsomorphismType::Full,
            true,
            true,
        )
        .unwrap();
        let parent = params.root();
        let chain = CandidateFilterChain::new(&parent, &FilterConfig::for_design(&params));
        let config = BranchConfig::default();
        group.bench_with_input(BenchmarkId::new("root", n), &n, |b, &n| {
            let mut stack = BranchStack::with_rows(n);
            b.iter(|| {
                let mut stats = Statistics::new();
                BranchAndBound::new(&parent, &chain, true, true, &config)
                    .generate(&mut stack, &mut stats)
                    .len()
            })
        });
    }
    group.finish();
}

fn bench_canonical_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical_form");
    for n in [8, 12, 16] {
        let m = create_root_three(n);
        group.bench_with_input(BenchmarkId::new("reduce_conference", n), &m, |b, m| {
            b.iter(|| reduce_conference(black_box(m), &NautyOracle))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_candidates,
    bench_branch_and_bound,
    bench_canonical_form
);
criterion_main!(benches);
