//! Engine configuration.

use super::error::{InvalidOrderReason, OrderBookError};
use serde::{Deserialize, Serialize};

/// Default number of ticker slots in an engine.
pub const MAX_TICKERS: usize = 1024;

/// Default number of price levels per side in published book snapshots.
pub const DEFAULT_SNAPSHOT_DEPTH: usize = 5;

/// Configuration for a [`crate::MatchingEngine`].
///
/// All fields have defaults, so a JSON document only needs to name the ones
/// it changes:
///
/// ```
/// use ticker_engine::EngineConfig;
///
/// let config = EngineConfig::from_json_str(r#"{ "max_tickers": 8 }"#).unwrap();
/// assert_eq!(config.max_tickers, 8);
/// assert!(!config.publish_book_snapshots);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of distinct tickers the engine can hold books for
    pub max_tickers: usize,

    /// Largest accepted order quantity. `None` disables the check.
    pub max_order_quantity: Option<u64>,

    /// Largest accepted price in minor units. `None` disables the check.
    pub max_price: Option<u128>,

    /// Whether a book snapshot is captured and published after every
    /// submission
    pub publish_book_snapshots: bool,

    /// Price levels per side in published snapshots
    pub snapshot_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_tickers: MAX_TICKERS,
            max_order_quantity: None,
            max_price: None,
            publish_book_snapshots: false,
            snapshot_depth: DEFAULT_SNAPSHOT_DEPTH,
        }
    }
}

impl EngineConfig {
    /// Set the number of ticker slots
    #[must_use]
    pub fn with_max_tickers(mut self, max_tickers: usize) -> Self {
        self.max_tickers = max_tickers;
        self
    }

    /// Set the largest accepted order quantity
    #[must_use]
    pub fn with_max_order_quantity(mut self, max: u64) -> Self {
        self.max_order_quantity = Some(max);
        self
    }

    /// Set the largest accepted price
    #[must_use]
    pub fn with_max_price(mut self, max: u128) -> Self {
        self.max_price = Some(max);
        self
    }

    /// Publish a snapshot of `depth` levels per side after every submission
    #[must_use]
    pub fn with_book_snapshots(mut self, depth: usize) -> Self {
        self.publish_book_snapshots = true;
        self.snapshot_depth = depth;
        self
    }

    /// Parse a configuration from JSON, then validate it.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidConfig`] if the JSON is malformed or
    /// the resulting configuration fails [`EngineConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, OrderBookError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| OrderBookError::InvalidConfig {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can run an engine.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidConfig`] when `max_tickers` is zero,
    /// or snapshots are enabled with a depth of zero.
    pub fn validate(&self) -> Result<(), OrderBookError> {
        if self.max_tickers == 0 {
            return Err(OrderBookError::InvalidConfig {
                message: "max_tickers must be at least 1".to_string(),
            });
        }
        if self.publish_book_snapshots && self.snapshot_depth == 0 {
            return Err(OrderBookError::InvalidConfig {
                message: "snapshot_depth must be at least 1 when snapshots are published"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// Apply the configured size limits to an order's quantity and price.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidOrder`] when a limit is exceeded.
    pub fn check_limits(&self, quantity: u64, price: u128) -> Result<(), OrderBookError> {
        if let Some(max) = self.max_order_quantity.filter(|&max| quantity > max) {
            return Err(OrderBookError::invalid(
                InvalidOrderReason::QuantityTooLarge { quantity, max },
            ));
        }
        if let Some(max) = self.max_price.filter(|&max| price > max) {
            return Err(OrderBookError::invalid(InvalidOrderReason::PriceTooLarge {
                price,
                max,
            }));
        }
        Ok(())
    }
}
