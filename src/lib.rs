pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::report::ReportOptions;
use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Report(ReportOptions),
    Rates,
    Stocks,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fintally starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        currencies = ?config.currencies,
        stocks = ?config.stocks,
        "Loaded config"
    );

    match command {
        AppCommand::Report(options) => cli::report::run(&config, &options),
        AppCommand::Rates => cli::market::run_rates(&config).await,
        AppCommand::Stocks => cli::market::run_stocks(&config).await,
    }
}
