//! Configuration for the summarizer
//!
//! Settings come from an optional `issue-summarizer.toml` with `ISSUE_SUMMARIZER__*` environment
//! overrides on top. The file is read again before every use.
#[allow(clippy::module_inception)]
mod config;
pub(crate) mod defaults;

pub use config::{Config, ENV_PREFIX};

pub const DEFAULT_CONFIG_PATH: &str = "issue-summarizer.toml";
