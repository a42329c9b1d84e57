//! qrgen desktop entrypoint

#![cfg_attr(all(target_os = "windows", not(debug_assertions)), windows_subsystem = "windows")]

use anyhow::Context;
use clap::Parser;
use qrgen::{AppConfig, app, logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "qrgen", version, about = "Turn text into a QR code and save it")]
struct Cli {
    /// Optional settings file (toml/yaml); built-in defaults otherwise
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;

    tracing::debug!(?config, "Loaded configuration");

    app::run(&config).context("QR generator window failed")
}
