use proptest::prelude::*;
use std::collections::HashMap;
use ticker_engine::{MatchingEngine, OrderId, OrderRequest, Side};

/// A resting order in the reference model.
#[derive(Debug, Clone)]
struct ModelOrder {
    id: OrderId,
    side: Side,
    quantity: u64,
    price: u128,
    sequence: u64,
}

/// Straightforward linear-scan matcher used as an oracle.
#[derive(Debug, Default)]
struct ReferenceBook {
    orders: Vec<ModelOrder>,
    next_sequence: u64,
}

impl ReferenceBook {
    fn best(&self, side: Side) -> Option<usize> {
        self.orders
            .iter()
            .enumerate()
            .filter(|(_, o)| o.side == side)
            .min_by(|(_, a), (_, b)| {
                let by_price = match side {
                    Side::Buy => b.price.cmp(&a.price),
                    Side::Sell => a.price.cmp(&b.price),
                };
                by_price.then(a.sequence.cmp(&b.sequence))
            })
            .map(|(index, _)| index)
    }

    /// Returns (buy id, sell id, quantity, price) per execution.
    fn submit(
        &mut self,
        id: OrderId,
        side: Side,
        quantity: u64,
        price: u128,
    ) -> Vec<(OrderId, OrderId, u64, u128)> {
        self.next_sequence += 1;
        self.orders.push(ModelOrder {
            id,
            side,
            quantity,
            price,
            sequence: self.next_sequence,
        });

        let mut fills = Vec::new();
        while let (Some(b), Some(s)) = (self.best(Side::Buy), self.best(Side::Sell)) {
            let (buy, sell) = (&self.orders[b], &self.orders[s]);
            if buy.price < sell.price {
                break;
            }
            let exec_price = if buy.sequence < sell.sequence { buy.price } else { sell.price };
            let qty = buy.quantity.min(sell.quantity);
            fills.push((buy.id, sell.id, qty, exec_price));
            self.orders[b].quantity -= qty;
            self.orders[s].quantity -= qty;
            self.orders.retain(|o| o.quantity > 0);
        }
        fills
    }
}

fn order_strategy() -> impl Strategy<Value = (bool, u64, u128)> {
    (any::<bool>(), 1u64..=50, 95u128..=105)
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_engine_matches_reference_model(orders in prop::collection::vec(order_strategy(), 1..80)) {
            let engine = MatchingEngine::default();
            let mut model = ReferenceBook::default();

            for (is_buy, quantity, price) in orders {
                let side = if is_buy { Side::Buy } else { Side::Sell };
                let result = engine.submit(OrderRequest::new(side, "PROP", quantity, price)).unwrap();
                let expected = model.submit(result.order_id, side, quantity, price);
                let actual: Vec<_> = result
                    .trades
                    .iter()
                    .map(|t| (t.buy_order_id, t.sell_order_id, t.quantity, t.price))
                    .collect();
                prop_assert_eq!(actual, expected);
            }
        }

        #[test]
        fn prop_conservation_and_no_crossing(orders in prop::collection::vec(order_strategy(), 1..120)) {
            let engine = MatchingEngine::default();
            let mut original: HashMap<OrderId, u64> = HashMap::new();
            let mut filled: HashMap<OrderId, u64> = HashMap::new();
            let mut submitted = 0u64;
            let mut traded = 0u64;

            for (is_buy, quantity, price) in orders {
                let side = if is_buy { Side::Buy } else { Side::Sell };
                let result = engine.submit(OrderRequest::new(side, "PROP", quantity, price)).unwrap();
                original.insert(result.order_id, quantity);
                submitted += quantity;

                for trade in &result.trades {
                    let buy_original = original[&trade.buy_order_id];
                    let sell_original = original[&trade.sell_order_id];
                    prop_assert!(trade.quantity > 0);
                    prop_assert!(trade.quantity <= buy_original.min(sell_original));
                    *filled.entry(trade.buy_order_id).or_default() += trade.quantity;
                    *filled.entry(trade.sell_order_id).or_default() += trade.quantity;
                    traded += trade.quantity;
                }

                let crossed = engine.with_book("PROP", |book| book.is_crossed()).unwrap();
                prop_assert!(!crossed);
            }

            for (id, fill) in &filled {
                prop_assert!(*fill <= original[id]);
            }
            let resting = engine
                .with_book("PROP", |book| book.total_bid_quantity() + book.total_ask_quantity())
                .unwrap();
            prop_assert_eq!(resting + 2 * traded, submitted);
        }

        #[test]
        fn prop_aggressor_never_trades_through_its_limit(orders in prop::collection::vec(order_strategy(), 1..80)) {
            let engine = MatchingEngine::default();
            for (is_buy, quantity, price) in orders {
                let side = if is_buy { Side::Buy } else { Side::Sell };
                let result = engine.submit(OrderRequest::new(side, "PROP", quantity, price)).unwrap();
                let mut last_price: Option<u128> = None;
                for trade in &result.trades {
                    prop_assert_eq!(trade.aggressor, side);
                    match side {
                        Side::Buy => prop_assert!(trade.price <= price),
                        Side::Sell => prop_assert!(trade.price >= price),
                    }
                    // Price priority: the aggressor meets its best prices first
                    if let Some(previous) = last_price {
                        match side {
                            Side::Buy => prop_assert!(trade.price >= previous),
                            Side::Sell => prop_assert!(trade.price <= previous),
                        }
                    }
                    last_price = Some(trade.price);
                }
            }
        }
    }
}
