use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fintally::cli::report::ReportOptions;
use fintally::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Summarise expenses by category for a period
    Report {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Period: W (week), M (month to date), Y (year to date) or ALL
        #[arg(short, long, default_value = "M")]
        period: String,

        /// Transactions CSV, overrides the configured file
        #[arg(short, long)]
        transactions: Option<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Display current currency exchange rates
    Rates,
    /// Display current stock prices
    Stocks,
}

impl From<Commands> for fintally::AppCommand {
    fn from(cmd: Commands) -> fintally::AppCommand {
        match cmd {
            Commands::Report {
                date,
                period,
                transactions,
                json,
            } => fintally::AppCommand::Report(ReportOptions {
                date,
                period,
                transactions,
                json,
            }),
            Commands::Rates => fintally::AppCommand::Rates,
            Commands::Stocks => fintally::AppCommand::Stocks,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fintally::cli::setup::setup(),
        Some(cmd) => fintally::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
