//! Standard tracing subscriber setup for manual test diagnostics.

/// Initialize a tracing subscriber with env-based filtering.
///
/// Default directive: `testplus=info`. Call once per process; tests that
/// assert on emitted events use `tracing-test` instead.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("testplus=info".parse().unwrap_or_default());

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
