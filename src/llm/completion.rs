use std::time::{Duration, Instant};

use derive_builder::Builder;
use serde_json::Value;

use crate::error::{Result, SummarizerError};

use super::{
    family::ModelFamily,
    pricing::{PriceTable, is_known_cost},
    provider::ChatProvider,
};

/// A single request to an LLM, built fresh for every call
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(setter(into), build_fn(error = "SummarizerError"))]
pub struct CompletionRequest {
    pub model: String,
    /// The system prompt
    pub prompt: String,
    /// Formatted issue and comments
    pub user_input: String,
}

impl CompletionRequest {
    #[must_use]
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }
}

/// The response of the LLM together with what it took to get it
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    pub model: String,
    pub prompt: String,
    pub user_input: String,
    pub response: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub elapsed: Duration,
    /// Estimated cost, [`UNKNOWN_COST`](super::UNKNOWN_COST) if the model has no known price
    pub cost: f64,
    /// The provider payload, only for display
    pub raw_response: Value,
}

impl CompletionResult {
    #[must_use]
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }

    #[must_use]
    pub fn has_known_cost(&self) -> bool {
        is_known_cost(self.cost)
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn tokens_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.total_tokens() as f64 / seconds
        } else {
            0.0
        }
    }
}

/// Sends completion requests to a provider and accounts for tokens, time and cost
#[derive(Debug, Clone)]
pub struct CompletionClient<P> {
    provider: P,
    prices: PriceTable,
}

impl<P: ChatProvider> CompletionClient<P> {
    pub fn new(provider: P, prices: PriceTable) -> Self {
        Self { provider, prices }
    }

    #[tracing::instrument(skip_all, fields(model = %request.model), err)]
    pub async fn complete(&self, request: CompletionRequest) -> Result<CompletionResult> {
        ModelFamily::from_model(&request.model)?;

        let started = Instant::now();
        let response = self.provider.chat(&request).await?;
        let elapsed = started.elapsed();

        let cost = self.prices.cost(
            &request.model,
            response.input_tokens,
            response.output_tokens,
        );
        if !is_known_cost(cost) {
            tracing::warn!(model = %request.model, "No price known for model, cost is unknown");
        }

        tracing::info!(
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            elapsed = ?elapsed,
            cost,
            "Completion finished"
        );

        let CompletionRequest {
            model,
            prompt,
            user_input,
        } = request;

        Ok(CompletionResult {
            model,
            prompt,
            user_input,
            response: response.content,
            input_tokens: response.input_tokens,
            output_tokens: response.output_tokens,
            elapsed,
            cost,
            raw_response: response.raw,
        })
    }
}
