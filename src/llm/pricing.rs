//! Approximate cost accounting for completions
//!
//! Providers change their prices at any time, so the table is part of the configuration rather
//! than the code. A model without a price does not fail the request, it yields [`UNKNOWN_COST`].
use serde::{Deserialize, Serialize};

/// Sentinel cost for models missing from the price table
pub const UNKNOWN_COST: f64 = -1.0;

/// False for [`UNKNOWN_COST`]; real costs are never negative
#[must_use]
pub fn is_known_cost(cost: f64) -> bool {
    cost > UNKNOWN_COST
}

/// Prices are per million tokens unless configured otherwise
pub const DEFAULT_PRICE_UNIT: u64 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPrice {
    pub model: String,
    /// Price per `unit` input tokens
    pub input: f64,
    /// Price per `unit` output tokens
    pub output: f64,
}

impl ModelPrice {
    #[must_use]
    pub fn new(model: impl Into<String>, input: f64, output: f64) -> Self {
        Self {
            model: model.into(),
            input,
            output,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    /// Number of tokens the prices are expressed in, applied to both input and output
    #[serde(default = "default_unit")]
    pub unit: u64,
    #[serde(default)]
    pub models: Vec<ModelPrice>,
}

fn default_unit() -> u64 {
    DEFAULT_PRICE_UNIT
}

/// OpenAI list prices in USD per million tokens
impl Default for PriceTable {
    fn default() -> Self {
        Self {
            unit: DEFAULT_PRICE_UNIT,
            models: vec![
                ModelPrice::new("gpt-3.5-turbo-0125", 0.5, 1.5),
                ModelPrice::new("gpt-4-turbo-2024-04-09", 10.0, 30.0),
            ],
        }
    }
}

impl PriceTable {
    /// Looks up the price of a model by its exact name
    #[must_use]
    pub fn price(&self, model: &str) -> Option<&ModelPrice> {
        self.models.iter().find(|price| price.model == model)
    }

    /// Cost of a completion, or [`UNKNOWN_COST`] if the model has no price
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cost(&self, model: &str, input_tokens: u64, output_tokens: u64) -> f64 {
        let Some(price) = self.price(model) else {
            return UNKNOWN_COST;
        };

        let unit = self.unit.max(1) as f64;
        let input_cost = input_tokens as f64 * price.input / unit;
        let output_cost = output_tokens as f64 * price.output / unit;

        input_cost + output_cost
    }

    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|price| price.model.as_str())
    }
}
