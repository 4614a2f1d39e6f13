//! Chat completion providers
//!
//! The [`ChatProvider`] trait is the seam between the accounting done by the completion client
//! and the provider api. Only OpenAI is implemented.
use std::time::Duration;

use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use secrecy::{ExposeSecret as _, SecretString};
use serde_json::Value;

use crate::error::{Result, SummarizerError};

use super::completion::CompletionRequest;

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// What a provider answered, before any accounting
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub content: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    /// The full response payload, for diagnostics
    pub raw: Value,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn chat(&self, request: &CompletionRequest) -> Result<ProviderResponse>;
}

#[derive(Debug, Clone)]
pub struct OpenAIProvider {
    client: Client<OpenAIConfig>,
}

impl OpenAIProvider {
    /// Creates a provider for the given key, optionally against a compatible api
    #[must_use]
    pub fn new(api_key: &SecretString, api_base: Option<&str>) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key.expose_secret());
        if let Some(api_base) = api_base {
            config = config.with_api_base(api_base);
        }

        // Failures are surfaced immediately, the caller decides whether to retry
        let no_retries = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Self {
            client: Client::with_config(config).with_backoff(no_retries),
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAIProvider {
    #[tracing::instrument(skip_all, fields(model = %request.model), err)]
    async fn chat(&self, request: &CompletionRequest) -> Result<ProviderResponse> {
        let response = self.client.chat().create(build_request(request)?).await?;

        let raw = serde_json::to_value(&response)
            .map_err(|err| SummarizerError::payload("OpenAI", err.to_string()))?;

        // Token counts come only from the usage metadata
        let usage = response
            .usage
            .as_ref()
            .ok_or_else(|| SummarizerError::payload("OpenAI", "response has no usage"))?;
        let input_tokens = u64::from(usage.prompt_tokens);
        let output_tokens = u64::from(usage.completion_tokens);

        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SummarizerError::payload("OpenAI", "response has no choices"))?
            .message
            .content
            .unwrap_or_default();

        tracing::debug!(input_tokens, output_tokens, "Received completion");

        Ok(ProviderResponse {
            content,
            input_tokens,
            output_tokens,
            raw,
        })
    }
}

/// A system message with the prompt followed by a user message with the input, sampled at
/// temperature zero for repeatable results
pub(crate) fn build_request(request: &CompletionRequest) -> Result<CreateChatCompletionRequest> {
    let request = CreateChatCompletionRequestArgs::default()
        .model(&request.model)
        .messages(vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.prompt.as_str())
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user_input.as_str())
                .build()?
                .into(),
        ])
        .temperature(0.0_f32)
        .build()?;

    Ok(request)
}

/// Reads the OpenAI api key from the environment
///
/// A `.env` file in the working directory is reloaded on every call and takes precedence, so a
/// changed key is picked up without restarting.
pub fn api_key_from_env() -> Result<SecretString> {
    if let Err(err) = dotenvy::dotenv_override()
        && !err.not_found()
    {
        tracing::warn!(error = %err, "Failed to load .env file");
    }

    std::env::var(OPENAI_API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from)
        .ok_or_else(missing_api_key)
}

pub(crate) fn missing_api_key() -> SummarizerError {
    SummarizerError::Configuration(format!(
        "{OPENAI_API_KEY_ENV} environment variable not set -- see README.md for instructions"
    ))
}
