//! Interactive text menu
//!
//! Keeps the last fetched issue around so it can be inspected and summarized without fetching it
//! again. Errors are printed and the user is returned to the menu.
use std::path::PathBuf;

use anyhow::{Result, bail};
use inquire::{CustomType, InquireError, Select, Text};
use strum::IntoEnumIterator as _;
use strum_macros::{Display, EnumIter};

use crate::{
    config::Config,
    github::{GithubIssueWithComments, reference::is_issue_url},
    report,
    summarizer::Summarizer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display)]
pub enum MenuOption {
    #[strum(to_string = "1. Retrieve GitHub issue data")]
    Fetch,
    #[strum(to_string = "2. Show raw GitHub issue data")]
    RawData,
    #[strum(to_string = "3. Show parsed GitHub issue data")]
    ParsedData,
    #[strum(to_string = "4. Get LLM response")]
    Summarize,
    #[strum(to_string = "5. Select model")]
    SelectModel,
    #[strum(to_string = "9. Exit")]
    Exit,
}

impl MenuOption {
    #[must_use]
    pub fn key(self) -> u8 {
        match self {
            MenuOption::Fetch => 1,
            MenuOption::RawData => 2,
            MenuOption::ParsedData => 3,
            MenuOption::Summarize => 4,
            MenuOption::SelectModel => 5,
            MenuOption::Exit => 9,
        }
    }

    /// Options that work on a previously fetched issue
    #[must_use]
    pub fn requires_issue(self) -> bool {
        matches!(
            self,
            MenuOption::RawData | MenuOption::ParsedData | MenuOption::Summarize
        )
    }
}

pub struct Menu {
    config_path: PathBuf,
    /// Model picked in this session, takes precedence over the configuration
    model: Option<String>,
    issue: Option<GithubIssueWithComments>,
}

impl Menu {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            model: None,
            issue: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("GitHub issue summarizer");

        loop {
            let option = match Select::new("What would you like to do?", MenuOption::iter().collect())
                .with_page_size(MenuOption::iter().count())
                .prompt()
            {
                Ok(option) => option,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(err) => return Err(err.into()),
            };

            if option == MenuOption::Exit {
                break;
            }

            if let Err(err) = self.handle(option).await {
                println!("Error: {err:#}");
            }
        }

        Ok(())
    }

    async fn handle(&mut self, option: MenuOption) -> Result<()> {
        if option.requires_issue() {
            self.issue()?;
        }

        match option {
            MenuOption::Fetch => self.fetch().await,
            MenuOption::RawData => {
                println!("{}", self.issue_data(true)?);
                Ok(())
            }
            MenuOption::ParsedData => {
                println!("{}", self.issue_data(false)?);
                Ok(())
            }
            MenuOption::Summarize => {
                println!("{}", self.summarize().await?);
                Ok(())
            }
            MenuOption::SelectModel => self.select_model(),
            MenuOption::Exit => Ok(()),
        }
    }

    async fn fetch(&mut self) -> Result<()> {
        let reference = Text::new("GitHub repository (owner/repo or url):")
            .with_help_message("An issue url can be pasted as is")
            .prompt()?;

        let number = if is_issue_url(&reference) {
            None
        } else {
            Some(CustomType::<u64>::new("Issue number:").prompt()?)
        };

        let summarizer = Summarizer::new(self.config()?, None)?;
        let issue = summarizer.fetch(&reference, number).await?;

        println!(
            "Retrieved issue #{} with {} comment(s)",
            issue.issue.number,
            issue.comments.len()
        );
        self.issue = Some(issue);

        Ok(())
    }

    fn select_model(&mut self) -> Result<()> {
        let config = self.config()?;
        let current = self.model.clone().unwrap_or_else(|| config.model.clone());
        let models = config.selectable_models();
        let cursor = models
            .iter()
            .position(|model| *model == current)
            .unwrap_or_default();

        let model = Select::new("Model:", models)
            .with_starting_cursor(cursor)
            .prompt()?;

        println!("Using {model}");
        self.model = Some(model);

        Ok(())
    }

    fn issue_data(&self, raw: bool) -> Result<String> {
        report::render_issue_data(self.issue()?, raw)
    }

    /// Summarizes the fetched issue with a freshly loaded configuration
    async fn summarize(&self) -> Result<String> {
        let issue = self.issue()?;

        let mut summarizer = Summarizer::from_env(self.config()?)?;
        if let Some(model) = &self.model {
            summarizer = summarizer.with_model(model.as_str());
        }

        println!("Asking {} ...", summarizer.config().model);
        let result = summarizer.complete(issue).await?;

        report::render_summary(&result, issue.html_url(), true)
    }

    fn issue(&self) -> Result<&GithubIssueWithComments> {
        match &self.issue {
            Some(issue) => Ok(issue),
            None => bail!("Retrieve the GitHub issue data first"),
        }
    }

    fn config(&self) -> Result<Config> {
        Ok(Config::load(&self.config_path)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils;

    use super::*;

    fn menu_with_issue() -> Menu {
        let mut menu = Menu::new("missing.toml");
        menu.issue = Some(
            GithubIssueWithComments::from_raw(
                test_utils::issue_json("https://api.github.com/repos/o/r/issues/1/comments"),
                test_utils::comments_json(),
            )
            .unwrap(),
        );
        menu
    }

    #[test]
    fn test_options_are_numbered() {
        let keys = MenuOption::iter().map(MenuOption::key).collect::<Vec<_>>();
        assert_eq!(keys, vec![1, 2, 3, 4, 5, 9]);

        for option in MenuOption::iter() {
            assert!(option.to_string().starts_with(&format!("{}. ", option.key())));
        }
    }

    #[tokio::test]
    async fn test_requires_fetched_issue() {
        let mut menu = Menu::new("missing.toml");

        for option in MenuOption::iter().filter(|option| option.requires_issue()) {
            let err = menu.handle(option).await.unwrap_err();
            assert_eq!(err.to_string(), "Retrieve the GitHub issue data first");
        }
    }

    #[test]
    fn test_issue_data_after_fetch() {
        let menu = menu_with_issue();

        let parsed = menu.issue_data(false).unwrap();
        assert!(parsed.contains("Submitted by: octocat"));

        let raw = menu.issue_data(true).unwrap();
        assert!(raw.contains("\"login\": \"octocat\""));
    }

    #[tokio::test]
    async fn test_exit_keeps_session() {
        let mut menu = menu_with_issue();

        menu.handle(MenuOption::Exit).await.unwrap();

        assert!(menu.issue.is_some());
    }
}
