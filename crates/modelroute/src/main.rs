mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { days, json } => commands::analyze::run(days, json),
        Commands::Select {
            task_type,
            description,
            context,
            threshold,
            json,
        } => commands::select::run(
            &task_type,
            &description,
            context.as_deref(),
            threshold,
            json,
        ),
        Commands::Record {
            model,
            task_type,
            tokens,
            failed,
            duration,
        } => commands::record::run(&model, &task_type, tokens, !failed, duration),
        Commands::Decisions { stats, limit } => commands::decisions::run(stats, limit),
        Commands::Init { force } => commands::init::run(force),
        Commands::Diagnostic { json } => commands::diagnostic::run(json),
        Commands::Version => commands::version::run(),
    }
}
