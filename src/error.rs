//! Errors raised by the fetcher, formatter and completion client
//!
//! Every failure carries a kind so front ends can present them uniformly. Network failures are
//! never retried; the caller decides whether to try again.
use thiserror::Error;

pub type Result<T, E = SummarizerError> = std::result::Result<T, E>;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumIs,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorKind {
    /// Missing credentials or an unreadable configuration
    Configuration,
    /// A malformed repository or issue reference
    Input,
    /// HTTP status errors, connection failures and timeouts
    Network,
    /// The requested model is not part of a recognized family
    UnsupportedModel,
    /// The provider answered, but not with something we understand
    Provider,
}

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("{0}")]
    Configuration(String),

    #[error(
        "Invalid repository format '{0}'. Must be in the form 'owner/repo', a full repository URL or an issue URL"
    )]
    InvalidRepository(String),

    #[error("Missing issue number for '{0}'; provide one or use a full issue URL")]
    MissingIssueNumber(String),

    #[error("Invalid issue number '{0}'")]
    InvalidIssueNumber(String),

    #[error("HTTP Error: {status} for url {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Connection Error: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("Timeout Error: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("Something went wrong: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    #[error("Unexpected response from {source_name}: {message}")]
    Payload {
        source_name: &'static str,
        message: String,
    },

    #[error("LLM request failed: {0}")]
    Provider(#[from] async_openai::error::OpenAIError),
}

impl SummarizerError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SummarizerError::Configuration(_) => ErrorKind::Configuration,
            SummarizerError::InvalidRepository(_)
            | SummarizerError::MissingIssueNumber(_)
            | SummarizerError::InvalidIssueNumber(_) => ErrorKind::Input,
            SummarizerError::HttpStatus { .. }
            | SummarizerError::Connection(_)
            | SummarizerError::Timeout(_)
            | SummarizerError::Request(_) => ErrorKind::Network,
            SummarizerError::UnsupportedModel(_) => ErrorKind::UnsupportedModel,
            SummarizerError::Payload { .. } => ErrorKind::Provider,
            SummarizerError::Provider(err) => match err {
                async_openai::error::OpenAIError::Reqwest(_) => ErrorKind::Network,
                _ => ErrorKind::Provider,
            },
        }
    }

    /// Classifies a reqwest failure into a timeout, connection, status or generic error
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SummarizerError::Timeout(err)
        } else if err.is_connect() {
            SummarizerError::Connection(err)
        } else if let Some(status) = err.status() {
            SummarizerError::HttpStatus {
                status,
                url: err.url().map(ToString::to_string).unwrap_or_default(),
            }
        } else {
            SummarizerError::Request(err)
        }
    }

    pub(crate) fn payload(source_name: &'static str, message: impl Into<String>) -> Self {
        SummarizerError::Payload {
            source_name,
            message: message.into(),
        }
    }
}

impl From<derive_builder::UninitializedFieldError> for SummarizerError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        SummarizerError::Configuration(format!("Incomplete completion request: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert!(
            SummarizerError::Configuration("missing".into())
                .kind()
                .is_configuration()
        );
        assert!(
            SummarizerError::InvalidRepository("repo".into())
                .kind()
                .is_input()
        );
        assert!(
            SummarizerError::MissingIssueNumber("o/r".into())
                .kind()
                .is_input()
        );
        assert!(
            SummarizerError::HttpStatus {
                status: reqwest::StatusCode::NOT_FOUND,
                url: "https://api.github.com/repos/o/r/issues/1".into()
            }
            .kind()
            .is_network()
        );
        assert!(
            SummarizerError::UnsupportedModel("claude".into())
                .kind()
                .is_unsupported_model()
        );
        assert!(
            SummarizerError::payload("GitHub", "bad json")
                .kind()
                .is_provider()
        );
    }

    #[test]
    fn test_messages() {
        let err = SummarizerError::HttpStatus {
            status: reqwest::StatusCode::NOT_FOUND,
            url: "https://api.github.com/repos/o/r/issues/1".into(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP Error: 404 Not Found for url https://api.github.com/repos/o/r/issues/1"
        );

        let err = SummarizerError::InvalidRepository("reponame".into());
        assert!(err.to_string().contains("'owner/repo'"));

        assert_eq!(ErrorKind::UnsupportedModel.to_string(), "unsupported-model");
    }
}
