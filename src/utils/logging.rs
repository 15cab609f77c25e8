use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize tracing for the command-line runner.
///
/// `RUST_LOG` wins over `filter`; an unparsable filter falls back to
/// [`DEFAULT_FILTER`]. Logs go to stderr so stdout stays clean for results.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .compact();

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();

    tracing::debug!(target: "logging", "Tracing initialized");
}

/// Convenience macros for common operations
#[macro_export]
macro_rules! trace_query {
    ($panel:expr, $query:expr) => {
        tracing::info!(target: "query", "Panel {}: executing {}", $panel, $query);
    };
}

#[macro_export]
macro_rules! trace_transition {
    ($panel:expr, $from:expr, $to:expr) => {
        tracing::debug!(target: "panel", "Panel {}: {:?} -> {:?}", $panel, $from, $to);
    };
}
