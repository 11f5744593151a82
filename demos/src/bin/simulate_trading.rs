//! Random order flow against the matching engine.
//!
//! Several broker threads submit random limit orders for random tickers at a
//! random pace, so brokers regularly contend for the same book, while a
//! `ThreadEventSink` renders the resulting trades. Every few
//! seconds the main thread logs a one-line summary of each book.
//!
//! Usage: `cargo run --bin simulate_trading -- [seconds]` (default 10).

use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use ticker_engine::prelude::{EngineConfig, MatchingEngine, Side, ThreadEventSink};
use tracing::{info, warn};

const TICKERS: [&str; 5] = ["AAPL", "GOOGL", "MSFT", "AMZN", "TSLA"];

/// Prices are in cents: 50.00 to 1500.00
const MIN_PRICE: u128 = 5_000;
const MAX_PRICE: u128 = 150_000;

const MAX_QUANTITY: u64 = 100;

const MIN_PAUSE_MS: u64 = 100;
const MAX_PAUSE_MS: u64 = 1_000;

const SUMMARY_INTERVAL: Duration = Duration::from_secs(2);

const BROKERS: usize = 5;

fn generate_orders(
    engine: Arc<MatchingEngine>,
    running: Arc<AtomicBool>,
    submitted: Arc<AtomicU64>,
) {
    let mut rng = rand::thread_rng();
    while running.load(Ordering::Relaxed) {
        let ticker = TICKERS[rng.gen_range(0..TICKERS.len())];
        let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
        let quantity = rng.gen_range(1..=MAX_QUANTITY);
        let price = rng.gen_range(MIN_PRICE..=MAX_PRICE);

        match engine.submit_order(side, ticker, quantity, price) {
            Ok(_) => {
                submitted.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => warn!("Order for {} rejected: {}", ticker, e),
        }

        thread::sleep(Duration::from_millis(rng.gen_range(MIN_PAUSE_MS..=MAX_PAUSE_MS)));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let seconds: u64 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 10,
    };
    info!("Simulating {} brokers over {} tickers for {} seconds", BROKERS, TICKERS.len(), seconds);

    let mut sink = ThreadEventSink::new();
    let processor = sink.start_processor();
    let engine = Arc::new(MatchingEngine::with_sink(EngineConfig::default(), &sink)?);
    // The engine now owns the only listeners; the processor stops when it is dropped
    drop(sink);

    let running = Arc::new(AtomicBool::new(true));
    let submitted = Arc::new(AtomicU64::new(0));
    let generators: Vec<_> = (0..BROKERS)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let running = Arc::clone(&running);
            let submitted = Arc::clone(&submitted);
            thread::spawn(move || generate_orders(engine, running, submitted))
        })
        .collect();

    let deadline = Instant::now() + Duration::from_secs(seconds);
    while Instant::now() < deadline {
        thread::sleep(SUMMARY_INTERVAL.min(deadline.saturating_duration_since(Instant::now())));
        for snapshot in engine.snapshots(5) {
            info!("Book {}", snapshot.summary());
        }
    }

    running.store(false, Ordering::Relaxed);
    for generator in generators {
        if generator.join().is_err() {
            warn!("Order generator panicked");
        }
    }

    info!("=== Final State ===");
    for ticker in engine.tickers() {
        if let Some(snapshot) = engine.snapshot(ticker.as_str(), 5) {
            info!(
                "{}: {} resting orders, {} trades, volume {}, spread {:?}",
                ticker,
                engine.order_count(ticker.as_str()),
                snapshot.trade_count,
                snapshot.traded_volume,
                snapshot.spread()
            );
        }
    }
    info!("Submitted {} orders", submitted.load(Ordering::Relaxed));

    drop(engine);
    if let Some(handle) = processor {
        if handle.join().is_err() {
            warn!("Event processor panicked");
        }
    }

    Ok(())
}
