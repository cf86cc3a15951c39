//! Logging setup for library hosts.

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize a tracing subscriber with an env filter defaulting to
/// `level`. `RUST_LOG` overrides the default when set. Safe to call
/// more than once; later calls are no-ops.
pub fn init_logger(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_does_not_panic() {
        init_logger(Level::DEBUG);
        init_logger(Level::INFO);
    }
}
