use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser, Debug, Clone)]
#[clap(author, about, version)]
pub struct Args {
    /// Optional path to overwrite the config
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config_path: PathBuf,

    /// Print the configuration and exit
    #[arg(long)]
    pub print_config: bool,

    /// Subcommands corresponding to each mode
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Default)]
pub enum Commands {
    /// Start the interactive menu (default)
    #[default]
    Menu,
    /// Fetch an issue and summarize it
    Summarize {
        /// `owner/repo`, a repository url or an issue url
        reference: String,
        /// Issue number, ignored when the reference is an issue url
        number: Option<u64>,
        /// Overwrite the configured model
        #[arg(short, long)]
        model: Option<String>,
        /// Also print everything sent to and received from the LLM
        #[arg(long, default_value_t = false)]
        raw: bool,
        /// Also print the issue data as sent to the LLM
        #[arg(long, default_value_t = false)]
        parsed: bool,
    },
    /// Fetch an issue and print it without calling the LLM
    Fetch {
        reference: String,
        number: Option<u64>,
        /// Print the data as returned by GitHub
        #[arg(long, default_value_t = false)]
        raw: bool,
    },
    /// List the models with known prices
    Models,
}
