//! Console logging setup
//!
//! `RUST_LOG` takes precedence; otherwise the configured level applies to
//! every target. Output goes to stderr so stdout stays machine readable.

use tracing_subscriber::{EnvFilter, fmt};

pub fn init_logging(default_level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
