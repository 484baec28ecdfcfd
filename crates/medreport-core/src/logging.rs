//! Tracing setup.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
/// Later calls are no-ops.
pub fn init(default_filter: &str) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .try_init();

    if result.is_ok() {
        tracing::info!("MedReport core v{}", env!("CARGO_PKG_VERSION"));
    }
}
