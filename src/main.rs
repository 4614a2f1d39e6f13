use anyhow::{Context as _, Result};
use clap::Parser;

use issue_summarizer::{
    cli::{Args, Commands},
    config::Config,
    menu::Menu,
    report,
    summarizer::Summarizer,
    summarizer_tracing,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.config_path)?;

    if args.print_config {
        println!(
            "{}",
            toml::to_string_pretty(&config).context("Failed to serialize configuration")?
        );
        return Ok(());
    }

    // An unwritable log dir does not stop the command
    if let Err(err) = summarizer_tracing::init(&config) {
        eprintln!("Failed to initialize logging: {err:#}");
    }

    match args.command.unwrap_or_default() {
        Commands::Menu => Menu::new(args.config_path).run().await,
        Commands::Summarize {
            reference,
            number,
            model,
            raw,
            parsed,
        } => {
            let mut summarizer = Summarizer::from_env(config)?;
            if let Some(model) = model {
                summarizer = summarizer.with_model(model);
            }

            let summary = summarizer.summarize(&reference, number).await?;

            if parsed {
                println!("{}", report::render_issue_data(&summary.issue, false)?);
            }
            println!(
                "{}",
                report::render_summary(&summary.result, summary.issue.html_url(), false)?
            );
            if raw {
                println!("{}", report::render_llm_data(&summary.result)?);
            }

            Ok(())
        }
        Commands::Fetch {
            reference,
            number,
            raw,
        } => {
            let issue = Summarizer::new(config, None)?
                .fetch(&reference, number)
                .await?;

            println!("{}", report::render_issue_data(&issue, raw)?);
            Ok(())
        }
        Commands::Models => {
            println!("{}", report::render_models(&config.pricing));
            Ok(())
        }
    }
}
