//! Fetches an issue, formats it and asks an LLM for a summary
//!
//! The summarizer owns its configuration and credentials; front ends create a fresh one whenever
//! they want edits to the configuration to take effect.
use secrecy::SecretString;

use crate::{
    config::Config,
    error::Result,
    github::{GithubClient, GithubIssueWithComments, IssueRef},
    llm::{
        CompletionClient, CompletionRequest, CompletionResult, ModelFamily, OpenAIProvider,
        provider,
    },
};

/// A fetched issue together with its summary
#[derive(Debug, Clone)]
pub struct Summary {
    pub issue: GithubIssueWithComments,
    pub result: CompletionResult,
}

#[derive(Debug, Clone)]
pub struct Summarizer {
    config: Config,
    openai_api_key: Option<SecretString>,
    github: GithubClient,
}

impl Summarizer {
    pub fn new(config: Config, openai_api_key: Option<SecretString>) -> Result<Self> {
        let github = GithubClient::from_env(config.github_api_base.as_str())?;

        Ok(Self {
            config,
            openai_api_key,
            github,
        })
    }

    /// Creates a summarizer with credentials from the environment
    ///
    /// A missing api key is only reported once a completion is requested.
    pub fn from_env(config: Config) -> Result<Self> {
        Self::new(config, provider::api_key_from_env().ok())
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Overrides the configured model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Fetches an issue and its comments
    pub async fn fetch(
        &self,
        reference: &str,
        number: Option<u64>,
    ) -> Result<GithubIssueWithComments> {
        let issue = IssueRef::parse(reference, number)?;

        self.github.fetch_issue_with_comments(&issue).await
    }

    /// Asks the configured model to summarize a fetched issue
    pub async fn complete(&self, issue: &GithubIssueWithComments) -> Result<CompletionResult> {
        let family = ModelFamily::from_model(&self.config.model)?;
        let api_key = self.api_key()?;

        let request = CompletionRequest::builder()
            .model(self.config.model.as_str())
            .prompt(self.config.prompt.as_str())
            .user_input(issue.user_input())
            .build()?;

        match family {
            ModelFamily::OpenAI => {
                let provider =
                    OpenAIProvider::new(api_key, self.config.openai_api_base.as_deref());

                CompletionClient::new(provider, self.config.pricing.clone())
                    .complete(request)
                    .await
            }
        }
    }

    /// Fetches and summarizes an issue
    ///
    /// The reference, the model and the credentials are all validated before anything goes over
    /// the network.
    #[tracing::instrument(skip(self), fields(model = %self.config.model), err)]
    pub async fn summarize(&self, reference: &str, number: Option<u64>) -> Result<Summary> {
        let issue_ref = IssueRef::parse(reference, number)?;
        ModelFamily::from_model(&self.config.model)?;
        self.api_key()?;

        let issue = self.github.fetch_issue_with_comments(&issue_ref).await?;
        let result = self.complete(&issue).await?;

        Ok(Summary { issue, result })
    }

    fn api_key(&self) -> Result<&SecretString> {
        self.openai_api_key
            .as_ref()
            .ok_or_else(provider::missing_api_key)
    }
}
