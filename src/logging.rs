//! Tracing subscriber setup

use crate::config::{LogFormat, LoggingConfig};
use anyhow::Result;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Events go to stderr
/// so they never interleave with the interactive output on stdout.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let (filter, rejected) = build_filter(config, rust_log.as_deref())?;

    match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if let Some(reason) = rejected {
        warn!(
            rust_log = rust_log.as_deref().unwrap_or_default(),
            error = %reason,
            level = %config.level,
            "Ignoring malformed RUST_LOG, using the configured level"
        );
    }
    Ok(())
}

/// Build the filter from `rust_log` when it parses, else from the configured
/// level. A rejected `RUST_LOG` comes back as its parse error so the caller can
/// report it once the subscriber is live.
fn build_filter(
    config: &LoggingConfig,
    rust_log: Option<&str>,
) -> Result<(EnvFilter, Option<String>)> {
    let rejected = match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => match EnvFilter::builder().parse(directives) {
            Ok(filter) => return Ok((filter, None)),
            Err(e) => Some(e.to_string()),
        },
        None => None,
    };

    let filter = EnvFilter::new("warn")
        .add_directive(format!("car_price_estimator={}", config.level).parse()?);
    Ok((filter, rejected))
}
