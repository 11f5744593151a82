//! Contains the core matching logic for the order book.
//!
//! Matching follows price/time priority: the highest bid meets the lowest
//! ask, and within a price level the earliest sequence goes first. Every
//! execution happens at the price of the order that was resting first.

use super::book::OrderBook;
use super::order::Side;
use super::trade::Trade;
use tracing::trace;

impl OrderBook {
    /// Runs the matcher until the book is no longer crossed.
    ///
    /// Trades are returned in execution order. Filled orders are removed as
    /// they fill and a final [`OrderBook::remove_filled`] pass clears any
    /// empty price level, so on return the best bid is strictly below the
    /// best ask.
    pub fn match_crossing(&mut self) -> Vec<Trade> {
        let mut trades = Vec::new();

        loop {
            // Best bid is the highest key, best ask the lowest
            let (Some(mut bid_entry), Some(mut ask_entry)) =
                (self.bids.last_entry(), self.asks.first_entry())
            else {
                break;
            };

            if *bid_entry.key() < *ask_entry.key() {
                break;
            }

            if bid_entry.get().is_empty() {
                bid_entry.remove();
                continue;
            }
            if ask_entry.get().is_empty() {
                ask_entry.remove();
                continue;
            }

            let bid_level = bid_entry.get_mut();
            let ask_level = ask_entry.get_mut();

            let (Some(buy), Some(sell)) = (bid_level.front_mut(), ask_level.front_mut()) else {
                break;
            };

            // The earlier sequence is the resting side and sets the price
            let (price, aggressor) = if buy.sequence() < sell.sequence() {
                (buy.price(), Side::Sell)
            } else {
                (sell.price(), Side::Buy)
            };
            let quantity = buy.quantity().min(sell.quantity());
            debug_assert!(quantity > 0, "zero-quantity order left in book");

            buy.fill(quantity);
            sell.fill(quantity);

            trace!(
                "Order book {}: matched buy {} with sell {} for {} @ {}",
                self.ticker,
                buy.id(),
                sell.id(),
                quantity,
                price
            );

            trades.push(Trade::new(
                self.ticker.clone(),
                buy.id(),
                sell.id(),
                quantity,
                price,
                aggressor,
            ));

            bid_level.pop_filled_front();
            ask_level.pop_filled_front();

            if bid_level.is_empty() {
                bid_entry.remove();
            }
            if ask_level.is_empty() {
                ask_entry.remove();
            }

            self.last_trade_price = Some(price);
            self.traded_volume = self.traded_volume.saturating_add(quantity);
            self.trade_count += 1;
        }

        self.remove_filled();
        debug_assert!(!self.is_crossed(), "book left crossed after matching");
        trades
    }
}
