//! Order book snapshot for book-state events

use super::level::PriceLevelSnapshot;
use super::order::Ticker;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

/// A snapshot of the order book state at a specific point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// The ticker this snapshot belongs to
    pub ticker: Ticker,

    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Bid levels, best (highest) price first
    pub bids: Vec<PriceLevelSnapshot>,

    /// Ask levels, best (lowest) price first
    pub asks: Vec<PriceLevelSnapshot>,

    /// Price of the last trade on the book, if any
    pub last_trade_price: Option<u128>,

    /// Total quantity traded on the book
    pub traded_volume: u64,

    /// Number of trades executed on the book
    pub trade_count: u64,
}

impl OrderBookSnapshot {
    /// Get the best bid price and quantity
    pub fn best_bid(&self) -> Option<(u128, u64)> {
        let bid = self.bids.first().map(|level| (level.price, level.quantity));
        trace!("best_bid: {:?}", bid);
        bid
    }

    /// Get the best ask price and quantity
    pub fn best_ask(&self) -> Option<(u128, u64)> {
        let ask = self.asks.first().map(|level| (level.price, level.quantity));
        trace!("best_ask: {:?}", ask);
        ask
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<u128> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => {
                Some(ask_price.saturating_sub(bid_price))
            }
            _ => None,
        }
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => {
                Some((bid_price as f64 + ask_price as f64) / 2.0)
            }
            _ => None,
        }
    }

    /// Total quantity across the included bid levels
    pub fn total_bid_volume(&self) -> u64 {
        self.bids.iter().map(|level| level.quantity).sum()
    }

    /// Total quantity across the included ask levels
    pub fn total_ask_volume(&self) -> u64 {
        self.asks.iter().map(|level| level.quantity).sum()
    }

    /// Number of orders across the included levels of both sides
    pub fn order_count(&self) -> usize {
        self.bids
            .iter()
            .chain(self.asks.iter())
            .map(|level| level.order_count)
            .sum()
    }

    /// One-line human-readable summary, e.g. for log output
    pub fn summary(&self) -> String {
        let fmt_level = |level: Option<(u128, u64)>| match level {
            Some((price, quantity)) => format!("{quantity}@{price}"),
            None => "-".to_string(),
        };
        format!(
            "{} bid {} / ask {} | {} levels x {} levels | last {} | volume {} in {} trades",
            self.ticker,
            fmt_level(self.best_bid()),
            fmt_level(self.best_ask()),
            self.bids.len(),
            self.asks.len(),
            self.last_trade_price
                .map_or_else(|| "-".to_string(), |p| p.to_string()),
            self.traded_volume,
            self.trade_count
        )
    }
}

/// A thread-safe listener called with the book state after each submission
/// when snapshot publishing is enabled.
pub type BookChangedListener = Arc<dyn Fn(&OrderBookSnapshot) + Send + Sync>;
