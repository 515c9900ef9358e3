//! MediCheck CLI - Command-line interface for drug interaction checks.

use clap::Parser;
use medicheck_cli::commands;
use medicheck_cli::{Cli, Command, Config, Formatter, HistoryLog};
use medicheck_knowledge::KnowledgeBase;
use medicheck_pipeline::{build_orchestrator, LiveOrchestrator};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> medicheck_cli::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let mut history = HistoryLog::open(HistoryLog::default_path()?);

    let output = match cli.command {
        Command::History => commands::execute_history(&history, &formatter)?,
        Command::ClearHistory => commands::execute_clear_history(&mut history, &formatter)?,
        Command::Check(args) => {
            let orchestrator = pipeline(&config)?;
            commands::execute_check(&args.drugs, &orchestrator, &mut history, &formatter).await?
        }
        Command::Rerun(args) => {
            let orchestrator = pipeline(&config)?;
            commands::execute_rerun(args.index, &orchestrator, &mut history, &formatter).await?
        }
        Command::Search(args) => {
            let orchestrator = pipeline(&config)?;
            commands::execute_search(&args.term, &orchestrator, &formatter).await?
        }
        Command::Info(args) => {
            let orchestrator = pipeline(&config)?;
            commands::execute_info(&args.drug, &orchestrator, &formatter).await?
        }
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Build the live pipeline; only commands that query a service pay for it
fn pipeline(config: &Config) -> medicheck_cli::Result<LiveOrchestrator> {
    Ok(build_orchestrator(
        &config.service,
        Arc::new(KnowledgeBase::curated()),
    )?)
}
