//! Stripes - assemble a directory of SVG icons into one symbol sprite.

mod cli;
mod config;
mod logger;
mod sprite;
mod svg;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use std::{path::PathBuf, process::ExitCode};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log!("error"; "{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Build { args } => {
            cli::build::run_build(cli.config.as_deref(), args).await?;
            Ok(())
        }
        Commands::Init { force } => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILE));
            cli::init::write_config(&path, *force)
        }
    }
}
