//! Rubric CLI - evidence synthesis and compliance scoring.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Synthesize {
            file,
            topic,
            output,
            json,
        } => commands::synthesize::run(file, topic, output, json, config, cli.verbose),

        Commands::Validate {
            file,
            frameworks,
            regulations,
            output,
            json,
        } => commands::validate::run(
            file,
            frameworks,
            regulations,
            output,
            json,
            config,
            cli.verbose,
        ),

        Commands::Assess { file, json } => commands::assess::run(file, json, config),

        Commands::Frameworks { json } => commands::frameworks::run(json, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "rubric=debug" } else { "rubric=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
