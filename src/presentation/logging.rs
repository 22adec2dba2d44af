// Tracing subscriber setup
use crate::infrastructure::config::LogLevel;
use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. `RUST_LOG` takes precedence over the
/// configured level when it is set.
pub fn init(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    // A subscriber may already be installed, e.g. by a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
