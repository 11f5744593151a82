/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Order value types: side, identifiers, tickers and the order record itself.

use super::error::{InvalidOrderReason, OrderBookError};
use crate::utils::current_time_millis;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Longest ticker symbol accepted, in bytes.
pub const MAX_TICKER_LEN: usize = 16;

/// Side of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Bid side
    Buy,
    /// Ask side
    Sell,
}

impl Side {
    /// The other side of the book.
    #[must_use]
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Engine-wide unique order identifier, assigned at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        OrderId(value)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A validated ticker symbol.
///
/// Tickers are 1 to [`MAX_TICKER_LEN`] bytes of ASCII letters, digits, or
/// one of `.`, `-`, `/`, `_`. Symbols are case sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Validate and build a ticker.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidOrder`] with
    /// [`InvalidOrderReason::InvalidTicker`] when the symbol is empty, too
    /// long, or contains unsupported characters.
    pub fn new(symbol: &str) -> Result<Self, OrderBookError> {
        let valid = !symbol.is_empty()
            && symbol.len() <= MAX_TICKER_LEN
            && symbol
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'/' | b'_'));
        if !valid {
            return Err(OrderBookError::invalid(InvalidOrderReason::InvalidTicker {
                ticker: symbol.to_string(),
            }));
        }
        Ok(Ticker(symbol.to_string()))
    }

    /// The symbol text.
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ticker {
    type Error = OrderBookError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ticker::new(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl Borrow<str> for Ticker {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single order.
///
/// Everything but `quantity` is fixed once the order has been placed in a
/// book; `quantity` only shrinks, and only through matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    side: Side,
    ticker: Ticker,
    quantity: u64,
    original_quantity: u64,
    price: u128,
    sequence: u64,
    timestamp: u64,
}

impl Order {
    /// Build a new order. The sequence is assigned later by the book that
    /// accepts it.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidOrder`] when `quantity` or `price` is
    /// zero.
    pub fn new(
        id: OrderId,
        side: Side,
        ticker: Ticker,
        quantity: u64,
        price: u128,
    ) -> Result<Self, OrderBookError> {
        if quantity == 0 {
            return Err(OrderBookError::invalid(InvalidOrderReason::ZeroQuantity));
        }
        if price == 0 {
            return Err(OrderBookError::invalid(InvalidOrderReason::ZeroPrice));
        }
        Ok(Self {
            id,
            side,
            ticker,
            quantity,
            original_quantity: quantity,
            price,
            sequence: 0,
            timestamp: current_time_millis(),
        })
    }

    /// Order identifier
    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Buy or sell
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Ticker this order trades
    #[inline]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Outstanding (unfilled) quantity
    #[inline]
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Quantity at submission
    #[inline]
    pub fn original_quantity(&self) -> u64 {
        self.original_quantity
    }

    /// Quantity filled so far
    #[inline]
    pub fn filled_quantity(&self) -> u64 {
        self.original_quantity - self.quantity
    }

    /// Limit price in minor units
    #[inline]
    pub fn price(&self) -> u128 {
        self.price
    }

    /// Arrival position within the ticker's book
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Creation time in milliseconds since the UNIX epoch
    #[inline]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// True once nothing is left to fill
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }

    pub(crate) fn set_sequence(&mut self, sequence: u64) {
        self.sequence = sequence;
    }

    pub(crate) fn fill(&mut self, quantity: u64) {
        debug_assert!(
            quantity <= self.quantity,
            "fill of {quantity} exceeds outstanding {} on order {}",
            self.quantity,
            self.id
        );
        self.quantity -= quantity;
    }
}

/// Raw order parameters as received from a caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Buy or sell
    pub side: Side,
    /// Ticker symbol text
    pub ticker: String,
    /// Requested quantity
    pub quantity: u64,
    /// Limit price in minor units
    pub price: u128,
}

impl OrderRequest {
    /// A request with the given parameters.
    pub fn new(side: Side, ticker: &str, quantity: u64, price: u128) -> Self {
        Self {
            side,
            ticker: ticker.to_string(),
            quantity,
            price,
        }
    }

    /// A buy request.
    pub fn buy(ticker: &str, quantity: u64, price: u128) -> Self {
        Self::new(Side::Buy, ticker, quantity, price)
    }

    /// A sell request.
    pub fn sell(ticker: &str, quantity: u64, price: u128) -> Self {
        Self::new(Side::Sell, ticker, quantity, price)
    }
}

/// Where a submitted order ended up once its matching pass completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Nothing filled; the whole quantity rests in the book
    Resting,
    /// Some quantity filled; the remainder rests in the book
    PartiallyFilled,
    /// Fully filled; nothing rests
    Filled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Resting => write!(f, "resting"),
            OrderStatus::PartiallyFilled => write!(f, "partially filled"),
            OrderStatus::Filled => write!(f, "filled"),
        }
    }
}
