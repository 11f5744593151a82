//! A single price level: resting orders at one price, in arrival order.

use super::order::Order;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// FIFO queue of resting orders sharing one price.
///
/// Orders are appended in sequence order, so the front is always the order
/// with time priority at this price.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: u128,
    orders: VecDeque<Order>,
}

impl PriceLevel {
    /// Creates an empty level at `price`.
    pub fn new(price: u128) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
        }
    }

    /// Price shared by every order in this level
    #[inline]
    pub fn price(&self) -> u128 {
        self.price
    }

    /// Number of resting orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// True when no orders rest here
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Sum of outstanding quantity
    pub fn total_quantity(&self) -> u64 {
        self.orders.iter().map(Order::quantity).sum()
    }

    /// Orders in time priority
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub(crate) fn push_back(&mut self, order: Order) {
        debug_assert_eq!(order.price(), self.price);
        debug_assert!(
            self.orders
                .back()
                .is_none_or(|last| last.sequence() < order.sequence()),
            "orders must be appended in sequence order"
        );
        self.orders.push_back(order);
    }

    pub(crate) fn front_mut(&mut self) -> Option<&mut Order> {
        self.orders.front_mut()
    }

    /// Pops the front order if it has been fully filled.
    pub(crate) fn pop_filled_front(&mut self) -> Option<Order> {
        if self.orders.front().is_some_and(Order::is_filled) {
            self.orders.pop_front()
        } else {
            None
        }
    }

    /// Drops every filled order, preserving the order of the rest.
    pub(crate) fn retain_unfilled(&mut self) -> usize {
        let before = self.orders.len();
        self.orders.retain(|order| !order.is_filled());
        before - self.orders.len()
    }

    /// Point-in-time aggregate view of this level.
    pub fn snapshot(&self) -> PriceLevelSnapshot {
        PriceLevelSnapshot {
            price: self.price,
            quantity: self.total_quantity(),
            order_count: self.order_count(),
        }
    }
}

/// Aggregated state of one price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevelSnapshot {
    /// Level price
    pub price: u128,
    /// Total outstanding quantity
    pub quantity: u64,
    /// Number of resting orders
    pub order_count: usize,
}
