mod export;
mod run;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sentiprice")]
#[command(about = "Weekly headline sentiment versus price movement report")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect last week's headlines, score them, align prices, and export CSVs
    Run {
        /// Ticker CSV to read (defaults to SENTIPRICE_TICKERS_PATH)
        #[arg(long)]
        tickers: Option<PathBuf>,

        /// Process only these symbols instead of the ticker file (repeatable)
        #[arg(long = "ticker", value_name = "SYMBOL")]
        ticker: Vec<String>,

        /// Report the Monday-Sunday week containing this date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        week_of: Option<NaiveDate>,

        /// Directory for news_data.csv and summary.csv (defaults to SENTIPRICE_OUTPUT_DIR)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Print the tickers and window that would be processed, then exit
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = sentiprice_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Run {
            tickers,
            ticker,
            week_of,
            out_dir,
            dry_run,
        }) => {
            run::run_weekly(
                &config,
                run::RunArgs {
                    tickers_path: tickers,
                    symbols: ticker,
                    week_of,
                    out_dir,
                    dry_run,
                },
            )
            .await?;
        }
        None => println!("sentiprice: use `sentiprice run` to build the weekly report"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
