use criterion::{BenchmarkId, Criterion};
use std::hint::black_box;
use ticker_engine::{MatchingEngine, Side};

/// Register benchmarks for aggressive orders sweeping many resting orders.
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("MatchingEngine - Sweep");

    for &levels in &[10u64, 100, 1_000] {
        group.bench_with_input(
            BenchmarkId::new("sweep_levels", levels),
            &levels,
            |b, &levels| {
                b.iter_with_setup(
                    || {
                        let engine = MatchingEngine::default();
                        for i in 0..levels {
                            engine
                                .submit_order(Side::Sell, "BENCH", 10, 1_000 + u128::from(i))
                                .expect("bench setup order must be accepted");
                        }
                        engine
                    },
                    |engine| {
                        let trades = engine
                            .submit_order(
                                Side::Buy,
                                "BENCH",
                                levels * 10,
                                1_000 + u128::from(levels),
                            )
                            .expect("sweep must be accepted");
                        assert_eq!(trades.len() as u64, levels);
                        black_box(trades)
                    },
                );
            },
        );
    }

    group.finish();
}
