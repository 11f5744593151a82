/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use super::order::{OrderId, Side, Ticker};
use crate::utils::current_time_millis;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// A single execution between one buy order and one sell order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Unique identifier for this execution
    pub trade_id: Uuid,
    /// The ticker the trade happened on
    pub ticker: Ticker,
    /// The buy side of the pair
    pub buy_order_id: OrderId,
    /// The sell side of the pair
    pub sell_order_id: OrderId,
    /// Quantity exchanged
    pub quantity: u64,
    /// Execution price, always the resting order's price
    pub price: u128,
    /// Side of the later-arriving order of the pair
    pub aggressor: Side,
    /// Unix timestamp in milliseconds
    pub timestamp: u64,
}

impl Trade {
    /// Create a trade with a fresh identifier and the current time.
    pub fn new(
        ticker: Ticker,
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        quantity: u64,
        price: u128,
        aggressor: Side,
    ) -> Self {
        Self {
            trade_id: Uuid::new_v4(),
            ticker,
            buy_order_id,
            sell_order_id,
            quantity,
            price,
            aggressor,
            timestamp: current_time_millis(),
        }
    }

    /// Notional value of the trade (price × quantity)
    #[must_use]
    #[inline]
    pub fn notional(&self) -> u128 {
        self.price.saturating_mul(self.quantity as u128)
    }

    /// Whether `order_id` is one of the two sides of this trade
    #[must_use]
    pub fn involves(&self, order_id: OrderId) -> bool {
        self.buy_order_id == order_id || self.sell_order_id == order_id
    }
}

/// The trades produced by one submission, delivered to listeners after the
/// ticker's book has been released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEvent {
    /// The ticker for this event
    pub ticker: Ticker,
    /// The submitted order that triggered the matching pass
    pub order_id: OrderId,
    /// Trades in execution order
    pub trades: Vec<Trade>,
    /// Unix timestamp in milliseconds when the event was created
    pub timestamp: u64,
}

impl TradeEvent {
    /// Wrap the trades of one submission.
    pub fn new(ticker: Ticker, order_id: OrderId, trades: Vec<Trade>) -> Self {
        Self {
            ticker,
            order_id,
            trades,
            timestamp: current_time_millis(),
        }
    }

    /// Total quantity across all trades
    #[must_use]
    pub fn executed_quantity(&self) -> u64 {
        self.trades.iter().map(|t| t.quantity).sum()
    }

    /// Volume-weighted average execution price, if anything traded
    #[must_use]
    pub fn average_price(&self) -> Option<f64> {
        let quantity = self.executed_quantity();
        if quantity == 0 {
            return None;
        }
        let notional: u128 = self.trades.iter().map(Trade::notional).sum();
        Some(notional as f64 / quantity as f64)
    }
}

/// Trade listener callback using Arc for shared ownership
pub type TradeListener = Arc<dyn Fn(&TradeEvent) + Send + Sync>;
