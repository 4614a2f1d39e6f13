use anyhow::Result;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Config;

const LOG_FILE_PREFIX: &str = concat!(env!("CARGO_PKG_NAME"), ".log");
const DEFAULT_FILTER: &str = "issue_summarizer=info";

/// Configures tracing for the app
///
/// Logs go to a daily rolling file in the configured log dir so the terminal stays free for the
/// user. `RUST_LOG` overrides the default filter.
pub fn init(config: &Config) -> Result<()> {
    std::fs::create_dir_all(&config.log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);

    let env_filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    let fmt_layer = fmt::layer()
        .compact()
        .with_ansi(false)
        .with_writer(file_appender);

    tracing_subscriber::registry()
        .with(env_filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
