/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Event sinks that move trades and book snapshots off the submission path.
//!
//! This module provides sinks through a trait-based design, with
//! implementations backed by crossbeam channels and a dedicated thread
//! (`ThreadEventSink`) and by Tokio channels and a spawned task
//! (`TokioEventSink`). The engine's listeners only enqueue; rendering or any
//! other slow consumption happens in the processor.

use super::snapshot::{BookChangedListener, OrderBookSnapshot};
use super::trade::{TradeEvent, TradeListener};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// An event emitted by the engine.
///
/// Serialized externally tagged (`{"Trade": {...}}`), which decodes without
/// buffering, so `u128` prices survive any field order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Trades produced by one submission
    Trade(TradeEvent),
    /// Book state after one submission
    Book(OrderBookSnapshot),
}

/// Source of the listeners an engine publishes into.
pub trait EventSink {
    /// Listener forwarding trade events into this sink.
    fn trade_listener(&self) -> TradeListener;

    /// Listener forwarding book snapshots into this sink.
    fn book_listener(&self) -> BookChangedListener;

    /// Whether a processor is draining this sink.
    fn is_processing(&self) -> bool;
}

/// Default processing: render each event as human-readable log lines.
pub fn log_event(event: &EngineEvent) {
    match event {
        EngineEvent::Trade(trade_event) => {
            info!(
                "Processing trades for {} (order {}): {} trades, executed quantity: {}",
                trade_event.ticker,
                trade_event.order_id,
                trade_event.trades.len(),
                trade_event.executed_quantity()
            );
            for trade in &trade_event.trades {
                info!(
                    "  Trade: {} units at price {} (buy {} / sell {}, aggressor {}, ID: {})",
                    trade.quantity,
                    trade.price,
                    trade.buy_order_id,
                    trade.sell_order_id,
                    trade.aggressor,
                    trade.trade_id
                );
            }
        }
        EngineEvent::Book(snapshot) => {
            info!("Book {}", snapshot.summary());
        }
    }
}

/// Sink backed by an unbounded crossbeam channel, drained on a dedicated
/// thread.
///
/// Events queue without bound until [`start_processor`](Self::start_processor)
/// or [`start_processor_with`](Self::start_processor_with) is called, so a
/// sink wired into a busy engine must be started promptly.
#[derive(Debug)]
pub struct ThreadEventSink {
    sender: crossbeam::channel::Sender<EngineEvent>,
    /// Receiver for events (taken when the processor starts)
    receiver: Option<crossbeam::channel::Receiver<EngineEvent>>,
}

impl ThreadEventSink {
    /// Create a sink with an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam::channel::unbounded();
        Self {
            sender,
            receiver: Some(receiver),
        }
    }

    /// Start a processor thread that logs every event.
    ///
    /// Returns `None` if a processor was already started.
    pub fn start_processor(&mut self) -> Option<std::thread::JoinHandle<()>> {
        self.start_processor_with(|event| log_event(&event))
    }

    /// Start a processor thread that hands every event to `handler`.
    ///
    /// The thread exits once the sink and every engine holding its
    /// listeners have been dropped. Returns `None` if a processor was
    /// already started.
    pub fn start_processor_with<F>(
        &mut self,
        mut handler: F,
    ) -> Option<std::thread::JoinHandle<()>>
    where
        F: FnMut(EngineEvent) + Send + 'static,
    {
        let receiver = self.receiver.take()?;
        Some(std::thread::spawn(move || {
            info!("Event processor started");
            while let Ok(event) = receiver.recv() {
                handler(event);
            }
            info!("Event processor stopped");
        }))
    }
}

impl Default for ThreadEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for ThreadEventSink {
    fn trade_listener(&self) -> TradeListener {
        let sender = self.sender.clone();
        Arc::new(move |event: &TradeEvent| {
            if let Err(e) = sender.send(EngineEvent::Trade(event.clone())) {
                error!("Failed to send trade event for {}: {}", event.ticker, e);
            }
        })
    }

    fn book_listener(&self) -> BookChangedListener {
        let sender = self.sender.clone();
        Arc::new(move |snapshot: &OrderBookSnapshot| {
            if let Err(e) = sender.send(EngineEvent::Book(snapshot.clone())) {
                error!("Failed to send book event for {}: {}", snapshot.ticker, e);
            }
        })
    }

    fn is_processing(&self) -> bool {
        self.receiver.is_none()
    }
}

/// Sink backed by a Tokio unbounded channel, drained by a spawned task.
///
/// As with [`ThreadEventSink`], events queue without bound until a processor
/// is started.
#[derive(Debug)]
pub struct TokioEventSink {
    sender: tokio::sync::mpsc::UnboundedSender<EngineEvent>,
    /// Receiver for events (taken when the processor starts)
    receiver: Option<tokio::sync::mpsc::UnboundedReceiver<EngineEvent>>,
}

impl TokioEventSink {
    /// Create a sink with a Tokio unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();
        Self {
            sender,
            receiver: Some(receiver),
        }
    }

    /// Start the processor as an async task that logs every event.
    ///
    /// Must be called from within a Tokio runtime. Returns `None` if a
    /// processor was already started.
    pub fn start_processor(&mut self) -> Option<tokio::task::JoinHandle<()>> {
        self.start_processor_with(|event| log_event(&event))
    }

    /// Start the processor as an async task that hands every event to
    /// `handler`.
    ///
    /// Must be called from within a Tokio runtime. Returns `None` if a
    /// processor was already started.
    pub fn start_processor_with<F>(
        &mut self,
        mut handler: F,
    ) -> Option<tokio::task::JoinHandle<()>>
    where
        F: FnMut(EngineEvent) + Send + 'static,
    {
        let mut receiver = self.receiver.take()?;
        Some(tokio::spawn(async move {
            info!("Event processor started (Tokio)");
            while let Some(event) = receiver.recv().await {
                handler(event);
            }
            info!("Event processor stopped (Tokio)");
        }))
    }
}

impl Default for TokioEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for TokioEventSink {
    fn trade_listener(&self) -> TradeListener {
        let sender = self.sender.clone();
        Arc::new(move |event: &TradeEvent| {
            if let Err(e) = sender.send(EngineEvent::Trade(event.clone())) {
                error!("Failed to send trade event for {}: {}", event.ticker, e);
            }
        })
    }

    fn book_listener(&self) -> BookChangedListener {
        let sender = self.sender.clone();
        Arc::new(move |snapshot: &OrderBookSnapshot| {
            if let Err(e) = sender.send(EngineEvent::Book(snapshot.clone())) {
                error!("Failed to send book event for {}: {}", snapshot.ticker, e);
            }
        })
    }

    fn is_processing(&self) -> bool {
        self.receiver.is_none()
    }
}
