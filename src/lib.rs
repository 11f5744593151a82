//! # Concurrent Per-Ticker Matching Engine
//!
//! A thread-safe limit order matching engine written in Rust. Every ticker
//! owns its own order book behind its own lock, so submissions to different
//! tickers proceed in parallel while submissions to the same ticker are
//! strictly serialized and matched with price/time priority.
//!
//! ## Key Features
//!
//! - **Per-Ticker Locking**: A fixed table of book slots (1024 by default),
//!   one per distinct ticker, each guarded by its own mutex.
//!
//! - **Price/Time Priority**: The highest bid meets the lowest ask; within a
//!   price level the earliest arrival goes first.
//!
//! - **Resting-Price Execution**: Every trade executes at the price of the
//!   order that was resting first, and records which side was the aggressor.
//!
//! - **Partial Fills**: An order keeps matching until it is filled or the
//!   book is no longer crossed; the remainder rests.
//!
//! - **Event Sinks**: Trades and book snapshots are handed to listeners after
//!   the ticker lock is released. Channel-backed sinks drain them on a
//!   dedicated thread or a Tokio task.
//!
//! - **Validation**: Zero quantities, zero prices, malformed tickers and
//!   configured size limits are rejected before any book is touched.
//!
//! ## Example
//!
//! ```rust
//! use ticker_engine::{MatchingEngine, Side};
//!
//! let engine = MatchingEngine::default();
//! engine.submit_order(Side::Sell, "AAPL", 100, 5_000).unwrap();
//! let trades = engine.submit_order(Side::Buy, "AAPL", 60, 5_100).unwrap();
//!
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].quantity, 60);
//! // Executed at the resting sell's price
//! assert_eq!(trades[0].price, 5_000);
//! assert_eq!(engine.best_ask("AAPL"), Some(5_000));
//! ```
//!
//! ## Sharing Between Threads
//!
//! `MatchingEngine` is `Send + Sync`. Wrap it in an `Arc` and submit from as
//! many threads as needed:
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use ticker_engine::{MatchingEngine, Side};
//!
//! let engine = Arc::new(MatchingEngine::default());
//! let handles: Vec<_> = ["AAPL", "MSFT"]
//!     .into_iter()
//!     .map(|ticker| {
//!         let engine = Arc::clone(&engine);
//!         thread::spawn(move || {
//!             for i in 1..=10 {
//!                 engine.submit_order(Side::Buy, ticker, 1, 100 + i).unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(engine.order_count("AAPL"), 10);
//! assert_eq!(engine.order_count("MSFT"), 10);
//! ```
//!
//! ## Prices and Quantities
//!
//! Prices are unsigned integers in the instrument's minor unit (for example
//! cents) and quantities are unsigned integers. Neither may be zero.
//!
//! ## Status
//! This project is currently in active development and is not yet suitable for production use.

pub mod orderbook;

pub mod prelude;
mod utils;

pub use orderbook::config::{DEFAULT_SNAPSHOT_DEPTH, EngineConfig, MAX_TICKERS};
pub use orderbook::engine::{MatchingEngine, SubmitResult};
pub use orderbook::serialization::{EventSerializer, JsonEventSerializer, SerializationError};
pub use orderbook::sink::{EngineEvent, EventSink, ThreadEventSink, TokioEventSink};
pub use orderbook::snapshot::BookChangedListener;
pub use orderbook::trade::{Trade, TradeEvent, TradeListener};
pub use orderbook::{
    InvalidOrderReason, Order, OrderBook, OrderBookError, OrderBookSnapshot, OrderId,
    OrderRequest, OrderStatus, Side, Ticker,
};
pub use utils::current_time_millis;
