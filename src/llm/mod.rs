//! Chat completions: model gate, provider, token and cost accounting
pub mod completion;
pub mod family;
pub mod pricing;
pub mod provider;

pub use completion::{CompletionClient, CompletionRequest, CompletionResult};
pub use family::ModelFamily;
pub use pricing::{ModelPrice, PriceTable, UNKNOWN_COST};
pub use provider::{ChatProvider, OpenAIProvider, ProviderResponse};
