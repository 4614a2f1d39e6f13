//! Fixtures shared by unit and integration tests
#![allow(dead_code)]
#![allow(clippy::missing_panics_doc)]
use serde_json::{Value, json};

use crate::github::models::{Comment, Issue};

pub const ISSUE_BODY: &str = "Uploading a 2GB file never returns.\n\n```\nclient.upload(path)\n```";

/// A raw issue payload as returned by the GitHub api, trimmed to the interesting fields plus a
/// few we ignore
#[must_use]
pub fn issue_json(comments_url: &str) -> Value {
    json!({
        "url": "https://api.github.com/repos/o/r/issues/1",
        "html_url": "https://github.com/o/r/issues/1",
        "comments_url": comments_url,
        "id": 1_234_567,
        "number": 1,
        "title": "Client hangs on large uploads",
        "body": ISSUE_BODY,
        "user": { "login": "octocat", "id": 1, "type": "User" },
        "labels": [
            { "id": 1, "name": "bug", "color": "d73a4a" },
            { "id": 2, "name": "help wanted", "color": "008672" }
        ],
        "state": "open",
        "locked": false,
        "comments": 2,
        "created_at": "2024-01-15T10:00:00Z",
        "updated_at": "2024-01-15T12:30:00Z",
        "closed_at": null,
        "author_association": "CONTRIBUTOR"
    })
}

#[must_use]
pub fn comments_json() -> Value {
    json!([
        {
            "id": 11,
            "user": { "login": "maintainer", "id": 2 },
            "created_at": "2024-01-15T11:00:00Z",
            "updated_at": "2024-01-15T11:00:00Z",
            "author_association": "OWNER",
            "body": "Can you share the client version?"
        },
        {
            "id": 12,
            "user": { "login": "octocat", "id": 1 },
            "created_at": "2024-01-15T12:30:00Z",
            "updated_at": "2024-01-15T12:30:00Z",
            "author_association": "CONTRIBUTOR",
            "body": "Version 1.2.3, happens on every upload."
        }
    ])
}

#[must_use]
pub fn issue() -> Issue {
    serde_json::from_value(issue_json(
        "https://api.github.com/repos/o/r/issues/1/comments",
    ))
    .unwrap()
}

#[must_use]
pub fn comments() -> Vec<Comment> {
    serde_json::from_value(comments_json()).unwrap()
}

/// A chat completion response in the shape of the OpenAI api
#[must_use]
pub fn chat_completion_json(model: &str, content: &str, input: u32, output: u32) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": model,
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop",
            "logprobs": null
        }],
        "usage": {
            "prompt_tokens": input,
            "completion_tokens": output,
            "total_tokens": input + output
        }
    })
}
