use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber. RUST_LOG wins when it is set and valid,
/// otherwise `default_log_settings` (e.g. `"core_pdocs=info"`) is used.
pub fn setup_logging(default_log_settings: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_log_settings));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init()
}
