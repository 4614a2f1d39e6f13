//! Resolves the many ways a user can point at a repository or an issue
//!
//! Accepted shapes:
//!
//! * `owner/repo`
//! * `https://github.com/owner/repo`, optionally with a trailing `.git` and/or `/`
//! * `https://api.github.com/repos/owner/repo`, optionally with a trailing `/`
//! * `https://github.com/owner/repo/issues/42`, in which case any separately given issue number
//!   is ignored
use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::error::{Result, SummarizerError};

pub const GITHUB_API_BASE: &str = "https://api.github.com";

const API_REPOS_PREFIX: &str = "https://api.github.com/repos/";
const WEB_PREFIXES: [&str; 3] = ["https://github.com/", "http://github.com/", "github.com/"];

static ISSUE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<repository>.+?)/issues/(?P<number>[^/?#]*)(?:[/?#].*)?$")
        .expect("Infallible; static regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    owner: String,
    name: String,
}

impl RepositoryRef {
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The repository url for the given api base, i.e. `https://api.github.com/repos/owner/repo`
    #[must_use]
    pub fn api_url(&self, api_base: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            api_base.trim_end_matches('/'),
            self.owner,
            self.name
        )
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryRef {
    type Err = SummarizerError;

    fn from_str(reference: &str) -> Result<Self> {
        let trimmed = reference.trim();

        let mut repository = trimmed
            .strip_prefix(API_REPOS_PREFIX)
            .or_else(|| {
                WEB_PREFIXES
                    .iter()
                    .find_map(|prefix| trimmed.strip_prefix(prefix))
            })
            .unwrap_or(trimmed);

        // Trailing slashes and `.git` can come in any order, i.e. `repo.git/`
        loop {
            let stripped = repository
                .strip_suffix('/')
                .or_else(|| repository.strip_suffix(".git"));
            match stripped {
                Some(stripped) => repository = stripped,
                None => break,
            }
        }

        match repository.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if is_valid_segment(owner) && is_valid_segment(name) => Ok(Self {
                owner: (*owner).to_string(),
                name: (*name).to_string(),
            }),
            _ => Err(SummarizerError::InvalidRepository(reference.to_string())),
        }
    }
}

/// Owner and repository names end up in api paths as is
fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '@' | ':' | '?' | '#'))
}

/// Converts any accepted repository reference into the canonical GitHub API url
pub fn normalize_repository_url(reference: &str) -> Result<String> {
    let repository: RepositoryRef = reference.parse()?;
    Ok(repository.api_url(GITHUB_API_BASE))
}

/// A single issue in a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    repository: RepositoryRef,
    number: u64,
}

impl IssueRef {
    /// Parses a reference into an issue
    ///
    /// If the reference is an issue url, the number is taken from the url and `number` is
    /// ignored.
    pub fn parse(reference: &str, number: Option<u64>) -> Result<Self> {
        if let Some(captures) = ISSUE_URL.captures(reference.trim()) {
            let number = parse_issue_number(&captures["number"])?;
            let repository = captures["repository"].parse()?;

            return Ok(Self { repository, number });
        }

        let repository = reference.parse()?;
        let number =
            number.ok_or_else(|| SummarizerError::MissingIssueNumber(reference.to_string()))?;

        Ok(Self { repository, number })
    }

    #[must_use]
    pub fn repository(&self) -> &RepositoryRef {
        &self.repository
    }

    #[must_use]
    pub fn number(&self) -> u64 {
        self.number
    }

    /// The issue url for the given api base, i.e. `https://api.github.com/repos/o/r/issues/1`
    #[must_use]
    pub fn api_url(&self, api_base: &str) -> String {
        format!(
            "{}/issues/{}",
            self.repository.api_url(api_base),
            self.number
        )
    }
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repository, self.number)
    }
}

/// Parses a user supplied issue number, tolerating surrounding whitespace and a leading `#`
pub fn parse_issue_number(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    trimmed
        .strip_prefix('#')
        .unwrap_or(trimmed)
        .parse()
        .map_err(|_| SummarizerError::InvalidIssueNumber(input.to_string()))
}

/// True if the reference already carries an issue number
#[must_use]
pub fn is_issue_url(reference: &str) -> bool {
    ISSUE_URL.is_match(reference.trim())
}
