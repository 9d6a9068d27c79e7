//! loginprobe CLI entry point.

use anyhow::Context;
use clap::Parser;

use loginprobe::cli::Cli;
use loginprobe::infrastructure::config::ConfigLoader;
use loginprobe::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let config = match cli.config.as_deref() {
        Some(path) => ConfigLoader::load_with_override(path),
        None => ConfigLoader::load(),
    };
    let config = match config.context("Failed to load configuration") {
        Ok(config) => config,
        Err(err) => loginprobe::cli::handle_error(&err, json),
    };

    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => {
            loginprobe::cli::handle_error(&err.context("Failed to initialize logging"), json)
        }
    };

    if let Err(err) = loginprobe::cli::commands::dispatch(cli, config).await {
        loginprobe::cli::handle_error(&err, json);
    }
}
