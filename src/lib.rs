pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod github;
pub mod llm;
pub mod menu;
pub mod report;
pub mod summarizer;
pub mod summarizer_tracing;
pub mod templates;
pub mod test_utils;
