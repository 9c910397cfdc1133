//! Game construction and solving benchmarks.
//!
//! Run with:
//! ```bash
//! cargo bench --bench spectroscopy
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use spectroscopy_rs::ccs;
use spectroscopy_rs::config::GameConfig;
use spectroscopy_rs::game::Game;
use spectroscopy_rs::lts::Lts;
use spectroscopy_rs::spectroscopy::Spectroscopy;
use spectroscopy_rs::successors::WeakLts;
use spectroscopy_rs::types::ProcessId;

// ============================================================================
// Helper: Random transition systems
// ============================================================================

/// Random LTS with two visible actions and tau (label 0).
fn random_lts(states: u32, transitions: usize, seed: u64) -> Lts {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let triples: Vec<(u32, u32, u32)> = (0..transitions)
        .map(|_| {
            (
                rng.random_range(0..states),
                rng.random_range(0..states),
                rng.random_range(0..3),
            )
        })
        .collect();
    Lts::from_triples(states, triples)
}

// ============================================================================
// Benchmark: Building the game graph
// ============================================================================

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("spectroscopy/build");
    let config = GameConfig::default();

    for states in [4, 6, 8] {
        let lts = random_lts(states, 2 * states as usize, 42);
        let weak = WeakLts::new(&lts);
        group.bench_with_input(BenchmarkId::new("random", states), &lts, |b, lts| {
            b.iter(|| Game::build(lts, &weak, ProcessId::new(0), ProcessId::new(1), &config));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Solving a prebuilt game
// ============================================================================

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("spectroscopy/solve");
    let config = GameConfig::default();

    for states in [4, 6, 8] {
        let lts = random_lts(states, 2 * states as usize, 42);
        let weak = WeakLts::new(&lts);
        let Ok(game) = Game::build(&lts, &weak, ProcessId::new(0), ProcessId::new(1), &config) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("random", states), &game, |b, game| {
            b.iter(|| game.winning_budgets());
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Whole pipeline on a known pair
// ============================================================================

fn bench_compare(c: &mut Criterion) {
    let lts = ccs::parse("P = tau.(tau.c.0 + b.0) + a.0 + tau.c.0; Q = tau.(tau.c.0 + b.0) + a.0").unwrap();
    let p = lts.process("P").unwrap();
    let q = lts.process("Q").unwrap();
    let config = GameConfig::default();

    c.bench_function("spectroscopy/compare/branching_tau", |b| {
        b.iter(|| Spectroscopy::compare(&lts, p, q, &config).map(|r| r.classify()));
    });
}

criterion_group!(benches, bench_build, bench_solve, bench_compare);

criterion_main!(benches);
