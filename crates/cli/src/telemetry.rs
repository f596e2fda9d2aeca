//! Logging setup for the `action` binary
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directives (default: info for the mobydick crates)
//! - `MOBYDICK_LOG_FORMAT`: `pretty` (default) or `json`
//! - `MOBYDICK_LOG_DIR`: also write JSON logs to a daily-rolling file in this directory
//!
//! Logs go to stderr so stdout only carries the report.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str =
    "mobydick_core=info,mobydick_infra_github=info,mobydick_infra_template=info,mobydick_validate=info,action=info";
const LOG_FILE_PREFIX: &str = "action.log";

/// Initialize tracing; keep the returned guard alive to flush the log file
pub fn init_logging() -> Result<Option<WorkerGuard>> {
    let log_format =
        std::env::var("MOBYDICK_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("Failed to create env filter")?;

    let (file_layer, guard) = match std::env::var("MOBYDICK_LOG_DIR") {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to install JSON subscriber")?;
        }
        _ => {
            // Development: Pretty formatting with colors
            registry
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to install pretty subscriber")?;
        }
    }

    Ok(guard)
}
