use ticker_engine::{
    EngineConfig, InvalidOrderReason, MatchingEngine, OrderBookError, OrderRequest, Side,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn populated_engine() -> MatchingEngine {
        let engine = MatchingEngine::new(
            EngineConfig::default()
                .with_max_order_quantity(1_000)
                .with_max_price(1_000_000),
        )
        .unwrap();
        engine.submit_order(Side::Buy, "AAPL", 10, 100).unwrap();
        engine.submit_order(Side::Sell, "AAPL", 10, 110).unwrap();
        engine
    }

    fn assert_untouched(engine: &MatchingEngine) {
        let snapshot = engine.snapshot("AAPL", 10).unwrap();
        assert_eq!(snapshot.best_bid(), Some((100, 10)));
        assert_eq!(snapshot.best_ask(), Some((110, 10)));
        assert_eq!(snapshot.order_count(), 2);
        assert_eq!(snapshot.trade_count, 0);
        assert_eq!(engine.book_count(), 1);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let engine = populated_engine();
        let err = engine.submit_order(Side::Sell, "AAPL", 0, 90).unwrap_err();
        assert_eq!(err, OrderBookError::invalid(InvalidOrderReason::ZeroQuantity));
        assert_untouched(&engine);
    }

    #[test]
    fn test_zero_price_rejected() {
        let engine = populated_engine();
        let err = engine.submit_order(Side::Sell, "AAPL", 5, 0).unwrap_err();
        assert_eq!(err, OrderBookError::invalid(InvalidOrderReason::ZeroPrice));
        assert_untouched(&engine);
    }

    #[test]
    fn test_limits_rejected_before_matching() {
        let engine = populated_engine();
        // Would cross the resting bid if accepted
        assert!(
            engine
                .submit_order(Side::Sell, "AAPL", 1_001, 90)
                .unwrap_err()
                .is_invalid_order()
        );
        assert!(
            engine
                .submit_order(Side::Buy, "AAPL", 1, 1_000_001)
                .unwrap_err()
                .is_invalid_order()
        );
        assert_untouched(&engine);
    }

    #[test]
    fn test_bad_tickers_rejected() {
        crate::init_test_tracing();
        let engine = populated_engine();
        for ticker in ["", "WAY-TOO-LONG-TICKER", "SP ACE", "EMOJI\u{1F680}"] {
            let err = engine.submit(OrderRequest::buy(ticker, 1, 100)).unwrap_err();
            assert_eq!(
                err,
                OrderBookError::invalid(InvalidOrderReason::InvalidTicker {
                    ticker: ticker.to_string()
                })
            );
        }
        assert_untouched(&engine);
    }

    #[test]
    fn test_accepted_ticker_punctuation() {
        let engine = MatchingEngine::default();
        for ticker in ["BRK.B", "BTC/USD", "ES-2026", "X_1"] {
            assert!(engine.submit_order(Side::Buy, ticker, 1, 1).is_ok());
        }
        assert_eq!(engine.book_count(), 4);
    }

    #[test]
    fn test_error_messages() {
        let engine = MatchingEngine::default();
        let err = engine.submit_order(Side::Buy, "AAPL", 0, 1).unwrap_err();
        assert_eq!(err.to_string(), "invalid order: quantity must be positive");
    }

    #[test]
    fn test_config_from_json_drives_engine() {
        let config =
            EngineConfig::from_json_str(r#"{ "max_tickers": 1, "max_order_quantity": 5 }"#).unwrap();
        let engine = MatchingEngine::new(config).unwrap();
        assert_eq!(engine.capacity(), 1);
        assert!(engine.submit_order(Side::Buy, "AAPL", 6, 1).is_err());
        assert!(engine.submit_order(Side::Buy, "AAPL", 5, 1).is_ok());
        assert!(matches!(
            engine.submit_order(Side::Buy, "MSFT", 5, 1),
            Err(OrderBookError::CapacityExceeded { capacity: 1, .. })
        ));
    }
}
