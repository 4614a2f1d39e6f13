use strum::IntoEnumIterator as _;

use crate::error::{Result, SummarizerError};

/// Model families we know how to talk to, recognized by the prefix of the model name
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumIter,
)]
pub enum ModelFamily {
    #[strum(serialize = "OpenAI")]
    OpenAI,
}

impl ModelFamily {
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            ModelFamily::OpenAI => "gpt",
        }
    }

    /// Finds the family of a model, failing for anything we do not support
    pub fn from_model(model: &str) -> Result<Self> {
        ModelFamily::iter()
            .find(|family| model.starts_with(family.prefix()))
            .ok_or_else(|| SummarizerError::UnsupportedModel(model.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_model() {
        for model in ["gpt-3.5-turbo-0125", "gpt-4-turbo-2024-04-09", "gpt-4o-mini"] {
            assert_eq!(ModelFamily::from_model(model).unwrap(), ModelFamily::OpenAI);
        }
    }

    #[test]
    fn test_unsupported_model() {
        for model in ["claude-3-opus", "llama3", "", "GPT-4"] {
            let err = ModelFamily::from_model(model).unwrap_err();
            assert!(err.kind().is_unsupported_model(), "for {model:?}");
        }

        assert_eq!(
            ModelFamily::from_model("claude-3-opus")
                .unwrap_err()
                .to_string(),
            "Unsupported model: claude-3-opus"
        );
    }
}
