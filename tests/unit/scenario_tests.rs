use ticker_engine::{MatchingEngine, OrderRequest, OrderStatus, Side};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sell_against_resting_buy_trades_at_resting_price() {
        let engine = MatchingEngine::default();
        assert!(engine.submit_order(Side::Buy, "X", 100, 50).unwrap().is_empty());

        let trades = engine.submit_order(Side::Sell, "X", 60, 48).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity, 60);
        assert_eq!(trades[0].price, 50);
        assert_eq!(trades[0].ticker.as_str(), "X");

        let resting = engine
            .with_book("X", |book| {
                book.resting_orders(Side::Buy)
                    .iter()
                    .map(|o| (o.quantity(), o.price()))
                    .collect::<Vec<_>>()
            })
            .unwrap();
        assert_eq!(resting, vec![(40, 50)]);
        assert_eq!(engine.best_ask("X"), None);
    }

    #[test]
    fn test_sell_on_empty_book_rests() {
        let engine = MatchingEngine::default();
        let trades = engine.submit_order(Side::Sell, "X", 50, 10).unwrap();
        assert!(trades.is_empty());
        assert_eq!(engine.order_count("X"), 1);
        assert_eq!(engine.best_ask("X"), Some(10));
        assert_eq!(engine.best_bid("X"), None);
    }

    #[test]
    fn test_earliest_buy_at_same_price_fills_first() {
        let engine = MatchingEngine::default();
        let first = engine.submit(OrderRequest::buy("X", 10, 20)).unwrap();
        let second = engine.submit(OrderRequest::buy("X", 10, 20)).unwrap();
        assert_eq!(first.sequence, 1);
        assert_eq!(second.sequence, 2);

        let sell = engine.submit(OrderRequest::sell("X", 10, 20)).unwrap();
        assert_eq!(sell.status, OrderStatus::Filled);
        assert_eq!(sell.trades.len(), 1);
        assert_eq!(sell.trades[0].buy_order_id, first.order_id);
        assert_eq!(sell.trades[0].sell_order_id, sell.order_id);

        let remaining = engine
            .with_book("X", |book| {
                book.resting_orders(Side::Buy)
                    .iter()
                    .map(|o| o.id())
                    .collect::<Vec<_>>()
            })
            .unwrap();
        assert_eq!(remaining, vec![second.order_id]);
    }

    #[test]
    fn test_tickers_do_not_interact() {
        let engine = MatchingEngine::default();
        engine.submit_order(Side::Buy, "AAPL", 10, 100).unwrap();
        let trades = engine.submit_order(Side::Sell, "MSFT", 10, 90).unwrap();
        assert!(trades.is_empty());
        assert_eq!(engine.order_count("AAPL"), 1);
        assert_eq!(engine.order_count("MSFT"), 1);
        assert_eq!(engine.best_bid("AAPL"), Some(100));
        assert_eq!(engine.best_ask("MSFT"), Some(90));
    }

    #[test]
    fn test_aggressive_buy_walks_the_book() {
        let engine = MatchingEngine::default();
        engine.submit_order(Side::Sell, "GOOGL", 5, 10_100).unwrap();
        engine.submit_order(Side::Sell, "GOOGL", 5, 10_050).unwrap();
        engine.submit_order(Side::Sell, "GOOGL", 5, 10_200).unwrap();

        let result = engine.submit(OrderRequest::buy("GOOGL", 12, 10_150)).unwrap();
        let fills: Vec<_> = result.trades.iter().map(|t| (t.quantity, t.price)).collect();
        assert_eq!(fills, vec![(5, 10_050), (5, 10_100)]);
        assert_eq!(result.status, OrderStatus::PartiallyFilled);
        assert_eq!(result.remaining_quantity, 2);
        assert!(result.trades.iter().all(|t| t.aggressor == Side::Buy));

        let snapshot = engine.snapshot("GOOGL", 5).unwrap();
        assert_eq!(snapshot.best_bid(), Some((10_150, 2)));
        assert_eq!(snapshot.best_ask(), Some((10_200, 5)));
        assert_eq!(snapshot.last_trade_price, Some(10_100));
        assert_eq!(snapshot.traded_volume, 10);
    }

    #[test]
    fn test_queries_on_unknown_ticker() {
        let engine = MatchingEngine::default();
        assert!(engine.snapshot("NOPE", 5).is_none());
        assert_eq!(engine.best_bid("NOPE"), None);
        assert_eq!(engine.order_count("NOPE"), 0);
        assert!(!engine.has_book("NOPE"));
        // Queries never create books
        assert_eq!(engine.book_count(), 0);
    }
}
