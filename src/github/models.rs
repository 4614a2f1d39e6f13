//! The parts of the GitHub issue payloads we care about
//!
//! Timestamps are kept as the strings GitHub sends, they are passed to the LLM verbatim.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub number: u64,
    pub title: String,
    /// GitHub sends `null` for issues without a description
    #[serde(default)]
    pub body: Option<String>,
    pub user: User,
    pub created_at: String,
    pub author_association: String,
    pub state: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub comments_url: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Issue {
    #[must_use]
    pub fn label_names(&self) -> Vec<&str> {
        self.labels.iter().map(|label| label.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub user: User,
    pub created_at: String,
    #[serde(default)]
    pub body: Option<String>,
}
