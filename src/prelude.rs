/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Prelude module that re-exports commonly used types and traits.
//!
//! Instead of importing each type individually, you can use:
//!
//! ```rust
//! use ticker_engine::prelude::*;
//! ```

// Engine and configuration
pub use crate::orderbook::config::EngineConfig;
pub use crate::orderbook::engine::{MatchingEngine, SubmitResult};
pub use crate::orderbook::error::{InvalidOrderReason, OrderBookError};

// Books and orders
pub use crate::orderbook::OrderBook;
pub use crate::orderbook::order::{Order, OrderId, OrderRequest, OrderStatus, Side, Ticker};

// Events and listeners
pub use crate::orderbook::sink::{EngineEvent, EventSink, ThreadEventSink, TokioEventSink};
pub use crate::orderbook::snapshot::{BookChangedListener, OrderBookSnapshot};
pub use crate::orderbook::trade::{Trade, TradeEvent, TradeListener};

// Serialization
pub use crate::orderbook::serialization::{EventSerializer, JsonEventSerializer};

// Utility functions
pub use crate::utils::current_time_millis;
