//! Turns GitHub issues and comments into compact text for an LLM
//!
//! Only the fields the LLM needs are kept, which saves tokens. Each field is prefixed with a
//! label, and free text bodies are wrapped in `'''` delimiter lines so the model can tell
//! structured metadata apart from user content.
//!
//! Bodies are not escaped: a body containing the delimiter itself is still wrapped as is.
use std::fmt::Write as _;

use crate::github::models::{Comment, Issue};

pub const BODY_DELIMITER: &str = "'''";

/// Formats an issue, one field per line in a fixed order
#[must_use]
pub fn format_issue(issue: &Issue) -> String {
    let mut text = String::new();

    let _ = writeln!(&mut text, "Title: {}", issue.title);
    write_body(&mut text, issue.body.as_deref());
    let _ = writeln!(&mut text, "Submitted by: {}", issue.user.login);
    let _ = writeln!(&mut text, "Submitted on: {}", issue.created_at);
    let _ = writeln!(
        &mut text,
        "Submitter association: {}",
        issue.author_association
    );
    let _ = writeln!(&mut text, "State: {}", issue.state);
    let _ = writeln!(&mut text, "Labels: {}", issue.label_names().join(", "));

    text
}

/// Formats comments in the order given; no comments yields an empty string
#[must_use]
pub fn format_comments(comments: &[Comment]) -> String {
    let mut text = String::new();

    for comment in comments {
        let _ = writeln!(&mut text, "Comment by: {}", comment.user.login);
        let _ = writeln!(&mut text, "Comment on: {}", comment.created_at);
        write_body(&mut text, comment.body.as_deref());
    }

    text
}

fn write_body(text: &mut String, body: Option<&str>) {
    let _ = writeln!(text, "Body (between {BODY_DELIMITER}):");
    let _ = writeln!(text, "{BODY_DELIMITER}");
    let _ = writeln!(text, "{}", body.unwrap_or_default());
    let _ = writeln!(text, "{BODY_DELIMITER}");
}
