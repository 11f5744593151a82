//! Per-ticker order books, price/time matching and the multi-ticker engine.

pub mod book;
/// Engine configuration and order limits.
pub mod config;
/// Multi-ticker engine with one independently locked book per ticker.
pub mod engine;
pub mod error;
/// FIFO queues of orders sharing one price.
pub mod level;
pub mod matching;
/// Orders, sides, tickers and identifiers.
pub mod order;
/// Pluggable serialization of engine events.
pub mod serialization;
/// Channel-backed sinks for trade and book events.
pub mod sink;
pub mod snapshot;
/// Executions and per-submission trade events
pub mod trade;

pub use book::OrderBook;
pub use config::{DEFAULT_SNAPSHOT_DEPTH, EngineConfig, MAX_TICKERS};
pub use engine::{MatchingEngine, SubmitResult};
pub use error::{InvalidOrderReason, OrderBookError};
pub use level::{PriceLevel, PriceLevelSnapshot};
pub use order::{Order, OrderId, OrderRequest, OrderStatus, Side, Ticker};
pub use serialization::{EventSerializer, JsonEventSerializer, SerializationError};
pub use sink::{EngineEvent, EventSink, ThreadEventSink, TokioEventSink};
pub use snapshot::{BookChangedListener, OrderBookSnapshot};
pub use trade::{Trade, TradeEvent, TradeListener};
