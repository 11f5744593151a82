//! Order book and engine error types

use serde::Serialize;
use thiserror::Error;

/// Why an order was rejected before reaching a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum InvalidOrderReason {
    /// Quantity was zero
    ZeroQuantity,

    /// Price was zero
    ZeroPrice,

    /// Ticker is empty, too long, or contains unsupported characters
    InvalidTicker {
        /// The rejected ticker text
        ticker: String,
    },

    /// Quantity is above the configured maximum
    QuantityTooLarge {
        /// The rejected quantity
        quantity: u64,
        /// The configured maximum
        max: u64,
    },

    /// Price is above the configured maximum
    PriceTooLarge {
        /// The rejected price
        price: u128,
        /// The configured maximum
        max: u128,
    },
}

impl std::fmt::Display for InvalidOrderReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidOrderReason::ZeroQuantity => write!(f, "quantity must be positive"),
            InvalidOrderReason::ZeroPrice => write!(f, "price must be positive"),
            InvalidOrderReason::InvalidTicker { ticker } => {
                write!(f, "unsupported ticker {ticker:?}")
            }
            InvalidOrderReason::QuantityTooLarge { quantity, max } => {
                write!(f, "quantity {quantity} exceeds maximum {max}")
            }
            InvalidOrderReason::PriceTooLarge { price, max } => {
                write!(f, "price {price} exceeds maximum {max}")
            }
        }
    }
}

/// Errors that can occur within the matching engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum OrderBookError {
    /// The order failed validation and was not inserted anywhere
    #[error("invalid order: {reason}")]
    InvalidOrder {
        /// What was wrong with the order
        reason: InvalidOrderReason,
    },

    /// Every ticker slot is taken and the order names a new ticker
    #[error("capacity exceeded: cannot open a book for {ticker}, all {capacity} ticker slots are in use")]
    CapacityExceeded {
        /// The ticker that could not be given a book
        ticker: String,
        /// Number of ticker slots in the engine
        capacity: usize,
    },

    /// Engine configuration cannot be used
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },
}

impl OrderBookError {
    /// Shorthand for an [`OrderBookError::InvalidOrder`] with the given reason.
    pub fn invalid(reason: InvalidOrderReason) -> Self {
        OrderBookError::InvalidOrder { reason }
    }

    /// Returns `true` for rejections caused by the order itself.
    #[must_use]
    pub fn is_invalid_order(&self) -> bool {
        matches!(self, OrderBookError::InvalidOrder { .. })
    }
}
