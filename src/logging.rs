use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the console tracing subscriber. Call once, before anything
/// else logs. The filter comes from RUST_LOG and defaults to `info`.
pub fn init_logging() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
