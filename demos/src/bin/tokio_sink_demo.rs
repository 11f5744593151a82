//! Trades and book snapshots delivered through a Tokio task.
//!
//! Two tickers receive a few crossing orders from blocking tasks; the sink's
//! processor serializes every event to JSON and logs it.

use std::sync::Arc;
use ticker_engine::prelude::{
    EngineConfig, EventSerializer, JsonEventSerializer, MatchingEngine, OrderRequest,
    TokioEventSink,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting Tokio sink demo");

    let serializer = JsonEventSerializer::new();
    let mut sink = TokioEventSink::new();
    let processor = sink.start_processor_with(move |event| {
        match serializer.serialize_event(&event) {
            Ok(bytes) => info!(
                "{} ({} bytes): {}",
                serializer.content_type(),
                bytes.len(),
                String::from_utf8_lossy(&bytes)
            ),
            Err(e) => warn!("Could not serialize event: {}", e),
        }
    });

    let config = EngineConfig::default().with_book_snapshots(3);
    let engine = Arc::new(MatchingEngine::with_sink(config, &sink)?);
    drop(sink);

    let flows = [
        (
            "BTC/USD",
            vec![
                OrderRequest::sell("BTC/USD", 2, 6_500_000),
                OrderRequest::sell("BTC/USD", 3, 6_510_000),
                OrderRequest::buy("BTC/USD", 4, 6_510_000),
            ],
        ),
        (
            "ETH/USD",
            vec![
                OrderRequest::buy("ETH/USD", 10, 310_000),
                OrderRequest::sell("ETH/USD", 4, 309_500),
            ],
        ),
    ];

    let mut tasks = Vec::new();
    for (ticker, requests) in flows {
        let engine = Arc::clone(&engine);
        tasks.push(tokio::task::spawn_blocking(move || {
            for request in requests {
                match engine.submit(request) {
                    Ok(result) => info!(
                        "{} order {} is {} after {} trades",
                        ticker,
                        result.order_id,
                        result.status,
                        result.trades.len()
                    ),
                    Err(e) => warn!("{} order rejected: {}", ticker, e),
                }
            }
        }));
    }
    for task in tasks {
        task.await?;
    }

    drop(engine);
    if let Some(processor) = processor {
        processor.await?;
    }

    info!("Tokio sink demo completed");
    Ok(())
}
