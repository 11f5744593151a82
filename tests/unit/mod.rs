mod property_tests;
mod scenario_tests;
mod validation_tests;

/// Route `tracing` output through the test harness so it is captured per test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
