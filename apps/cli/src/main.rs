#![allow(clippy::print_stderr, clippy::print_stdout)]

mod args;
mod handlers;
mod render;

use crate::args::{Cli, Commands};
use anyhow::{Context, Result};
use clap::Parser;
use fitclass::domain::config::ApiConfig;
use fitclass::kernel::config::load_config;
use fitclass_logger::{LevelFilter, Logger};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log = if cli.verbose {
        Some(
            Logger::builder()
                .name(env!("CARGO_PKG_NAME"))
                .level(LevelFilter::DEBUG)
                .stderr(true)
                .init()?,
        )
    } else {
        None
    };

    let cfg: ApiConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;

    match cli.command {
        Commands::Predict { form, model, json } => handlers::predict::run(cfg, &form, model, json)?,
        Commands::Features { form, json } => handlers::features::run(cfg, &form, json)?,
        Commands::Schemes {} => handlers::schemes::run(&cfg),
    }

    Ok(())
}
