/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Multi-ticker matching engine with per-ticker locking.
//!
//! The engine owns a fixed table of book slots, one per distinct ticker.
//! Tickers are assigned a slot the first time they are seen; each slot holds
//! its book behind its own mutex, so submissions to different tickers never
//! contend while submissions to the same ticker are serialized. Listeners are
//! only called after the ticker's lock has been released.

use super::book::OrderBook;
use super::config::EngineConfig;
use super::error::OrderBookError;
use super::order::{Order, OrderId, OrderRequest, OrderStatus, Side, Ticker};
use super::sink::EventSink;
use super::snapshot::{BookChangedListener, OrderBookSnapshot};
use super::trade::{Trade, TradeEvent, TradeListener};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// Outcome of a single accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitResult {
    /// Identifier assigned to the submitted order
    pub order_id: OrderId,
    /// Ticker the order was routed to
    pub ticker: Ticker,
    /// Side of the submitted order
    pub side: Side,
    /// Arrival sequence within the ticker's book
    pub sequence: u64,
    /// Where the order ended up after matching
    pub status: OrderStatus,
    /// Quantity of the submitted order that traded
    pub filled_quantity: u64,
    /// Quantity of the submitted order left resting
    pub remaining_quantity: u64,
    /// All trades of the matching pass, in execution order
    pub trades: Vec<Trade>,
}

/// Matching engine holding one order book per ticker.
///
/// `MatchingEngine` is `Send + Sync`; share it between submitting threads
/// with an `Arc`.
pub struct MatchingEngine {
    config: EngineConfig,

    /// Book slots; a slot is initialised when its ticker is first seen
    slots: Box<[OnceLock<Mutex<OrderBook>>]>,

    /// Ticker to slot index
    registry: DashMap<Ticker, usize>,

    /// Next free slot index
    next_slot: AtomicUsize,

    /// Counter for engine-wide order identifiers
    next_order_id: AtomicU64,

    trade_listener: Option<TradeListener>,

    book_listener: Option<BookChangedListener>,
}

impl MatchingEngine {
    /// Create an engine from a configuration.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidConfig`] if the configuration does
    /// not validate.
    pub fn new(config: EngineConfig) -> Result<Self, OrderBookError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: EngineConfig) -> Self {
        let slots = (0..config.max_tickers)
            .map(|_| OnceLock::new())
            .collect::<Vec<_>>()
            .into_boxed_slice();
        info!(
            "Matching engine created with {} ticker slots",
            config.max_tickers
        );
        Self {
            config,
            slots,
            registry: DashMap::new(),
            next_slot: AtomicUsize::new(0),
            next_order_id: AtomicU64::new(1),
            trade_listener: None,
            book_listener: None,
        }
    }

    /// Create an engine whose trades and book snapshots are delivered to
    /// `sink`.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidConfig`] if the configuration does
    /// not validate.
    pub fn with_sink(config: EngineConfig, sink: &impl EventSink) -> Result<Self, OrderBookError> {
        let mut engine = Self::new(config)?;
        if !sink.is_processing() {
            warn!("Event sink has no processor yet; events will queue until one is started");
        }
        engine.set_trade_listener(sink.trade_listener());
        engine.set_book_listener(sink.book_listener());
        Ok(engine)
    }

    /// Set a trade listener, called once per submission that traded
    pub fn set_trade_listener(&mut self, listener: TradeListener) {
        self.trade_listener = Some(listener);
    }

    /// Remove the trade listener
    pub fn remove_trade_listener(&mut self) {
        self.trade_listener = None;
    }

    /// Set a book listener, called with a snapshot after every submission
    /// when [`EngineConfig::publish_book_snapshots`] is enabled
    pub fn set_book_listener(&mut self, listener: BookChangedListener) {
        self.book_listener = Some(listener);
    }

    /// Remove the book listener
    pub fn remove_book_listener(&mut self) {
        self.book_listener = None;
    }

    /// The engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Submit an order and return the trades it produced.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidOrder`] when the quantity or price is
    /// zero, a configured limit is exceeded, or the ticker is not valid, and
    /// [`OrderBookError::CapacityExceeded`] when the ticker is new and every
    /// slot is taken. Nothing is inserted on error.
    pub fn submit_order(
        &self,
        side: Side,
        ticker: &str,
        quantity: u64,
        price: u128,
    ) -> Result<Vec<Trade>, OrderBookError> {
        self.submit(OrderRequest::new(side, ticker, quantity, price))
            .map(|result| result.trades)
    }

    /// Submit an order and return the full outcome.
    ///
    /// Validation happens before any book is touched. The ticker's book is
    /// then locked for the insert, the matching pass and the pruning of
    /// filled orders; listeners run after the lock is released.
    ///
    /// # Errors
    /// See [`MatchingEngine::submit_order`].
    pub fn submit(&self, request: OrderRequest) -> Result<SubmitResult, OrderBookError> {
        self.try_submit(&request).inspect_err(|e| {
            warn!(
                "Rejected {} {} {} @ {}: {}",
                request.side, request.ticker, request.quantity, request.price, e
            );
        })
    }

    fn try_submit(&self, request: &OrderRequest) -> Result<SubmitResult, OrderBookError> {
        let ticker = Ticker::new(&request.ticker)?;
        self.config.check_limits(request.quantity, request.price)?;

        let order_id = OrderId::from_u64(self.next_order_id.fetch_add(1, Ordering::Relaxed));
        let order = Order::new(
            order_id,
            request.side,
            ticker.clone(),
            request.quantity,
            request.price,
        )?;
        let slot = self.book_slot(&ticker)?;

        let (sequence, trades, snapshot) = {
            let mut book = slot.lock();
            let sequence = book.insert(order);
            let trades = book.match_crossing();
            let snapshot = self
                .config
                .publish_book_snapshots
                .then(|| book.snapshot(self.config.snapshot_depth));
            (sequence, trades, snapshot)
        };

        let filled_quantity: u64 = trades
            .iter()
            .filter(|t| t.involves(order_id))
            .map(|t| t.quantity)
            .sum();
        debug_assert!(filled_quantity <= request.quantity);
        let remaining_quantity = request.quantity - filled_quantity;
        let status = if remaining_quantity == 0 {
            OrderStatus::Filled
        } else if filled_quantity > 0 {
            OrderStatus::PartiallyFilled
        } else {
            OrderStatus::Resting
        };

        debug!(
            "Submitted {} {} {} {} @ {} (seq {}): {}, {} trades",
            order_id,
            request.side,
            ticker,
            request.quantity,
            request.price,
            sequence,
            status,
            trades.len()
        );

        if let Some(listener) = self.trade_listener.as_ref().filter(|_| !trades.is_empty()) {
            listener(&TradeEvent::new(ticker.clone(), order_id, trades.clone()));
        }
        if let (Some(listener), Some(snapshot)) = (&self.book_listener, &snapshot) {
            listener(snapshot);
        }

        Ok(SubmitResult {
            order_id,
            ticker,
            side: request.side,
            sequence,
            status,
            filled_quantity,
            remaining_quantity,
            trades,
        })
    }

    /// Slot for `ticker`, assigning one if the ticker is new.
    fn book_slot(&self, ticker: &Ticker) -> Result<&Mutex<OrderBook>, OrderBookError> {
        // The registry guard must be released before `register` takes the
        // shard's write lock.
        let existing = self.registry.get(ticker.as_str()).map(|entry| *entry);
        let index = match existing {
            Some(index) => index,
            None => self.register(ticker)?,
        };
        Ok(self.slots[index].get_or_init(|| Mutex::new(OrderBook::new(ticker.clone()))))
    }

    fn register(&self, ticker: &Ticker) -> Result<usize, OrderBookError> {
        match self.registry.entry(ticker.clone()) {
            Entry::Occupied(entry) => Ok(*entry.get()),
            Entry::Vacant(entry) => {
                let capacity = self.slots.len();
                let index = self
                    .next_slot
                    .fetch_update(Ordering::AcqRel, Ordering::Acquire, |next| {
                        (next < capacity).then_some(next + 1)
                    })
                    .map_err(|_| OrderBookError::CapacityExceeded {
                        ticker: ticker.to_string(),
                        capacity,
                    })?;
                entry.insert(index);
                info!("Added order book for ticker {} in slot {}", ticker, index);
                Ok(index)
            }
        }
    }

    /// Slot for `ticker` if it already has a book; never assigns one.
    fn existing_slot(&self, ticker: &str) -> Option<&Mutex<OrderBook>> {
        let index = self.registry.get(ticker).map(|entry| *entry)?;
        self.slots[index].get()
    }

    /// Run `f` against the ticker's book while holding its lock.
    ///
    /// Returns `None` if the ticker has no book. Keep `f` short: it blocks
    /// submissions to this ticker.
    pub fn with_book<R>(&self, ticker: &str, f: impl FnOnce(&OrderBook) -> R) -> Option<R> {
        let slot = self.existing_slot(ticker)?;
        let book = slot.lock();
        Some(f(&book))
    }

    /// Snapshot of the top `depth` levels of the ticker's book
    pub fn snapshot(&self, ticker: &str, depth: usize) -> Option<OrderBookSnapshot> {
        self.with_book(ticker, |book| book.snapshot(depth))
    }

    /// Snapshots of every book, taken one lock at a time, in slot order
    pub fn snapshots(&self, depth: usize) -> Vec<OrderBookSnapshot> {
        self.tickers()
            .iter()
            .filter_map(|ticker| self.snapshot(ticker.as_str(), depth))
            .collect()
    }

    /// Best bid of the ticker's book
    pub fn best_bid(&self, ticker: &str) -> Option<u128> {
        self.with_book(ticker, OrderBook::best_bid).flatten()
    }

    /// Best ask of the ticker's book
    pub fn best_ask(&self, ticker: &str) -> Option<u128> {
        self.with_book(ticker, OrderBook::best_ask).flatten()
    }

    /// Resting orders in the ticker's book, 0 if it has no book
    pub fn order_count(&self, ticker: &str) -> usize {
        self.with_book(ticker, OrderBook::order_count).unwrap_or(0)
    }

    /// Whether `ticker` has been assigned a book
    pub fn has_book(&self, ticker: &str) -> bool {
        self.registry.contains_key(ticker)
    }

    /// Tickers with a book, in the order they were first seen
    pub fn tickers(&self) -> Vec<Ticker> {
        let mut entries: Vec<(usize, Ticker)> = self
            .registry
            .iter()
            .map(|entry| (*entry.value(), entry.key().clone()))
            .collect();
        entries.sort_unstable_by_key(|(index, _)| *index);
        entries.into_iter().map(|(_, ticker)| ticker).collect()
    }

    /// Number of tickers with a book
    pub fn book_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of ticker slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::from_validated(EngineConfig::default())
    }
}

impl fmt::Debug for MatchingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchingEngine")
            .field("config", &self.config)
            .field("book_count", &self.book_count())
            .field("has_trade_listener", &self.trade_listener.is_some())
            .field("has_book_listener", &self.book_listener.is_some())
            .finish()
    }
}
