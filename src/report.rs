//! Renders fetched issues and completion results for the terminal
use std::{borrow::Cow, sync::LazyLock};

use anyhow::Result;
use regex::Regex;
use serde_json::{Value, json};

use crate::{
    github::GithubIssueWithComments,
    llm::{CompletionResult, ModelFamily, PriceTable},
    templates::Templates,
};

static LEVEL_ONE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# ").expect("Infallible; static regex"));

/// Turns markdown level one headings into level three so they do not dominate the output
#[must_use]
pub fn demote_headings(text: &str) -> Cow<'_, str> {
    LEVEL_ONE_HEADING.replace_all(text, "### ")
}

/// The estimated cost in dollars, or `unknown` for unpriced models
#[must_use]
pub fn format_cost(result: &CompletionResult) -> String {
    if result.has_known_cost() {
        format!("US ${:.4}", result.cost)
    } else {
        "unknown".to_string()
    }
}

/// The LLM response followed by model, tokens, cost and timing
pub fn render_summary(
    result: &CompletionResult,
    issue_url: Option<&str>,
    heading: bool,
) -> Result<String> {
    let context = tera::Context::from_serialize(json!({
        "heading": heading,
        "model": result.model,
        "response": demote_headings(&result.response),
        "input_tokens": result.input_tokens,
        "output_tokens": result.output_tokens,
        "total_tokens": result.total_tokens(),
        "cost": format_cost(result),
        "elapsed": format!("{:.2}", result.elapsed.as_secs_f64()),
        "tokens_per_second": format!("{:.1}", result.tokens_per_second()),
        "issue_url": issue_url,
    }))?;

    Templates::render("summary.txt", &context)
}

/// The issue and comments, either as GitHub sent them or as formatted for the LLM
pub fn render_issue_data(issue: &GithubIssueWithComments, raw: bool) -> Result<String> {
    let context = if raw {
        json!({
            "title": "Raw GitHub issue data",
            "issue": pretty(&issue.raw_issue),
            "comments": pretty(&issue.raw_comments),
        })
    } else {
        json!({
            "title": "Parsed GitHub issue data",
            "issue": issue.formatted_issue(),
            "comments": issue.formatted_comments(),
        })
    };

    Templates::render("issue_data.txt", &tera::Context::from_serialize(context)?)
}

/// Everything sent to and received from the LLM
pub fn render_llm_data(result: &CompletionResult) -> Result<String> {
    let context = tera::Context::from_serialize(json!({
        "raw_response": pretty(&result.raw_response),
        "prompt": result.prompt,
        "user_input": result.user_input,
    }))?;

    Templates::render("llm_data.txt", &context)
}

/// One line per priced model, marking the ones the summarizer cannot use
#[must_use]
pub fn render_models(prices: &PriceTable) -> String {
    let mut lines = vec![format!("Prices in US $ per {} tokens", prices.unit)];

    for price in &prices.models {
        let unsupported = if ModelFamily::from_model(&price.model).is_ok() {
            ""
        } else {
            " (unsupported)"
        };
        lines.push(format!(
            "{}: input {}, output {}{unsupported}",
            price.model, price.input, price.output
        ));
    }

    lines.join("\n")
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
