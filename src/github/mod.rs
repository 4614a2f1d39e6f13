//! Read-only GitHub issue access
pub mod client;
pub mod models;
pub mod reference;

pub use client::{GithubClient, GithubIssueWithComments};
pub use reference::{IssueRef, RepositoryRef, normalize_repository_url};
