//! Core OrderBook implementation for managing resting orders of one ticker

use super::level::PriceLevel;
use super::order::{Order, Side, Ticker};
use super::snapshot::OrderBookSnapshot;
use crate::utils::current_time_millis;
use std::collections::BTreeMap;
use tracing::trace;

/// The OrderBook holds the resting buy and sell orders of a single ticker.
///
/// Both sides are price-ordered maps of FIFO price levels, so the best price
/// is always at one end of its map and time priority is the level's front.
/// The book itself is not synchronized; the engine serializes access to it.
#[derive(Debug)]
pub struct OrderBook {
    /// The ticker this book belongs to
    pub(super) ticker: Ticker,

    /// Bid side price levels; the best bid is the last key
    pub(super) bids: BTreeMap<u128, PriceLevel>,

    /// Ask side price levels; the best ask is the first key
    pub(super) asks: BTreeMap<u128, PriceLevel>,

    /// Sequence handed to the next inserted order
    pub(super) next_sequence: u64,

    /// The last price at which a trade occurred
    pub(super) last_trade_price: Option<u128>,

    /// Total quantity traded on this book
    pub(super) traded_volume: u64,

    /// Number of trades executed on this book
    pub(super) trade_count: u64,
}

impl OrderBook {
    /// Create a new, empty order book for the given ticker
    pub fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            next_sequence: 1,
            last_trade_price: None,
            traded_volume: 0,
            trade_count: 0,
        }
    }

    /// Get the ticker of this order book
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Adds an order to its side of the book, stamping it with the next
    /// sequence number. Returns the assigned sequence.
    ///
    /// No matching happens here; see [`OrderBook::match_crossing`].
    pub fn insert(&mut self, mut order: Order) -> u64 {
        debug_assert_eq!(order.ticker(), &self.ticker, "order routed to wrong book");
        debug_assert!(!order.is_filled(), "filled orders never enter a book");

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        order.set_sequence(sequence);

        trace!(
            "Order book {}: inserting {} {} {} @ {} (seq {})",
            self.ticker,
            order.id(),
            order.side(),
            order.quantity(),
            order.price(),
            sequence
        );

        let price = order.price();
        let book_side = match order.side() {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        book_side
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .push_back(order);
        sequence
    }

    /// Drops orders whose quantity reached zero and any price level left
    /// empty. Returns how many orders were removed.
    pub fn remove_filled(&mut self) -> usize {
        let mut removed = 0;
        for book_side in [&mut self.bids, &mut self.asks] {
            book_side.retain(|_, level| {
                removed += level.retain_unfilled();
                !level.is_empty()
            });
        }
        if removed > 0 {
            trace!("Order book {}: pruned {} filled orders", self.ticker, removed);
        }
        removed
    }

    /// Sequence that the next inserted order will receive
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Get the best bid price, if any
    pub fn best_bid(&self) -> Option<u128> {
        self.bids.keys().next_back().copied()
    }

    /// Get the best ask price, if any
    pub fn best_ask(&self) -> Option<u128> {
        self.asks.keys().next().copied()
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<u128> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.saturating_sub(bid)),
            _ => None,
        }
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid as f64 + ask as f64) / 2.0),
            _ => None,
        }
    }

    /// True if some resting buy is priced at or above some resting sell.
    ///
    /// Only observable from inside a matching pass.
    pub fn is_crossed(&self) -> bool {
        matches!((self.best_bid(), self.best_ask()), (Some(bid), Some(ask)) if bid >= ask)
    }

    /// Number of resting buy orders
    pub fn bid_order_count(&self) -> usize {
        self.bids.values().map(PriceLevel::order_count).sum()
    }

    /// Number of resting sell orders
    pub fn ask_order_count(&self) -> usize {
        self.asks.values().map(PriceLevel::order_count).sum()
    }

    /// Number of resting orders on both sides
    pub fn order_count(&self) -> usize {
        self.bid_order_count() + self.ask_order_count()
    }

    /// True when neither side has resting orders
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Outstanding quantity on the bid side
    pub fn total_bid_quantity(&self) -> u64 {
        self.bids.values().map(PriceLevel::total_quantity).sum()
    }

    /// Outstanding quantity on the ask side
    pub fn total_ask_quantity(&self) -> u64 {
        self.asks.values().map(PriceLevel::total_quantity).sum()
    }

    /// Resting orders of one side in matching priority: best price first,
    /// then earliest sequence.
    pub fn resting_orders(&self, side: Side) -> Vec<&Order> {
        match side {
            Side::Buy => self.bids.values().rev().flat_map(PriceLevel::iter).collect(),
            Side::Sell => self.asks.values().flat_map(PriceLevel::iter).collect(),
        }
    }

    /// Price of the most recent trade, if any
    pub fn last_trade_price(&self) -> Option<u128> {
        self.last_trade_price
    }

    /// Total quantity traded on this book
    pub fn traded_volume(&self) -> u64 {
        self.traded_volume
    }

    /// Number of trades executed on this book
    pub fn trade_count(&self) -> u64 {
        self.trade_count
    }

    /// Create a snapshot of the top `depth` price levels on each side
    pub fn snapshot(&self, depth: usize) -> OrderBookSnapshot {
        OrderBookSnapshot {
            ticker: self.ticker.clone(),
            timestamp: current_time_millis(),
            bids: self
                .bids
                .values()
                .rev()
                .take(depth)
                .map(PriceLevel::snapshot)
                .collect(),
            asks: self
                .asks
                .values()
                .take(depth)
                .map(PriceLevel::snapshot)
                .collect(),
            last_trade_price: self.last_trade_price,
            traded_volume: self.traded_volume,
            trade_count: self.trade_count,
        }
    }
}
