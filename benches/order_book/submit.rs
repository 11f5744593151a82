use criterion::{BenchmarkId, Criterion};
use std::hint::black_box;
use ticker_engine::{MatchingEngine, Side};

/// Register benchmarks for single-threaded submissions through the engine.
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("MatchingEngine - Submit");

    // Non-crossing submissions into books of increasing depth
    for &depth in &[100u64, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("resting_order", depth),
            &depth,
            |b, &depth| {
                b.iter_with_setup(
                    || {
                        let engine = MatchingEngine::default();
                        for i in 0..depth {
                            let price = 1_000 + u128::from(i % 500);
                            engine
                                .submit_order(Side::Buy, "BENCH", 10, price)
                                .expect("bench setup order must be accepted");
                        }
                        engine
                    },
                    |engine| black_box(engine.submit_order(Side::Buy, "BENCH", 10, 999)),
                );
            },
        );
    }

    // Alternating buy/sell at one price: every second submission trades
    group.bench_function("alternating_cross", |b| {
        let engine = MatchingEngine::default();
        let mut i = 0u64;
        b.iter(|| {
            let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
            i += 1;
            black_box(engine.submit_order(side, "BENCH", 10, 1_000))
        });
    });

    // Rejections never reach a book
    group.bench_function("rejected_zero_quantity", |b| {
        let engine = MatchingEngine::default();
        b.iter(|| black_box(engine.submit_order(Side::Buy, "BENCH", 0, 1_000)))
    });

    group.finish();
}
