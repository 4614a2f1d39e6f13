use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use ::config::{Config as ConfigRs, Environment, File};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SummarizerError},
    llm::PriceTable,
};

use super::defaults;

/// Prefix for environment overrides, i.e. `ISSUE_SUMMARIZER__MODEL=gpt-4-turbo-2024-04-09`
pub const ENV_PREFIX: &str = "ISSUE_SUMMARIZER";

/// User editable settings
///
/// Credentials are never part of the configuration, they are read from the environment when
/// they are needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Model used for summaries
    #[serde(default = "defaults::default_model")]
    pub model: String,

    /// System prompt sent with every summary request
    #[serde(default = "defaults::default_prompt")]
    pub prompt: String,

    /// Models offered in the interactive menu
    #[serde(default = "defaults::default_models")]
    pub models: Vec<String>,

    #[serde(default = "defaults::default_github_api_base")]
    pub github_api_base: String,

    /// Overwrite to use an OpenAI compatible api
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_base: Option<String>,

    #[serde(default = "defaults::default_log_dir")]
    pub log_dir: PathBuf,

    /// Prices per model, used to estimate the cost of a summary
    #[serde(default)]
    pub pricing: PriceTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: defaults::default_model(),
            prompt: defaults::default_prompt(),
            models: defaults::default_models(),
            github_api_base: defaults::default_github_api_base(),
            openai_api_base: None,
            log_dir: defaults::default_log_dir(),
            pricing: PriceTable::default(),
        }
    }
}

impl FromStr for Config {
    type Err = SummarizerError;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|err| {
            SummarizerError::Configuration(format!("Failed to parse configuration: {err}"))
        })
    }
}

impl Config {
    /// Loads the configuration file, if present, with environment overrides on top
    ///
    /// Intended to be called before every use so edits apply without a restart.
    pub fn load(path: &Path) -> Result<Self> {
        let builder = ConfigRs::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            );

        builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|err| {
                SummarizerError::Configuration(format!(
                    "Failed to load configuration from {}: {err}",
                    path.display()
                ))
            })
    }

    /// The models to choose from, always including the configured one
    #[must_use]
    pub fn selectable_models(&self) -> Vec<String> {
        let mut models = self.models.clone();
        if !models.contains(&self.model) {
            models.insert(0, self.model.clone());
        }
        models
    }
}
