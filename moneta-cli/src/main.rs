use anyhow::Result;
use clap::{Parser, Subcommand};
use moneta_finance::{Period, LOOKBACK_DAYS};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod ingest_cmd;
mod report_cmd;
mod state;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("MONETA_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "moneta",
    version,
    long_version = LONG_VERSION,
    about = "Turn bank SMS alerts into a categorized spending ledger"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse message texts and print the structured transactions (nothing is stored)
    Parse {
        /// Raw SMS bodies
        texts: Vec<String>,
    },

    /// Parse messages and append them to the ledger
    Ingest {
        /// Raw SMS bodies
        texts: Vec<String>,

        /// Receiver dump with one `<sender>: <body>` per line (repeatable)
        #[arg(long = "file")]
        files: Vec<PathBuf>,

        /// SMS backup CSV with address/body/date columns (repeatable)
        #[arg(long)]
        csv: Vec<PathBuf>,

        /// Source tag (defaults to config `ingest.source`)
        #[arg(long)]
        source: Option<String>,

        /// Receive time in epoch milliseconds for the positional texts
        #[arg(long)]
        timestamp_ms: Option<i64>,

        /// Print what would be recorded without touching the ledger
        #[arg(long)]
        dry_run: bool,
    },

    /// Spending and income totals for the current week or month
    Report {
        /// week | month (defaults to config `report.default_period`)
        #[arg(long)]
        period: Option<Period>,

        #[arg(long)]
        json: bool,
    },

    /// Savings rate, top categories and balance range over a lookback window
    Insights {
        #[arg(long, default_value_t = LOOKBACK_DAYS)]
        days: i64,

        #[arg(long)]
        json: bool,
    },

    /// Monthly budget targets from recent history
    Budget {
        /// Target savings percentage, 0 to 100
        #[arg(long)]
        target: Option<f64>,

        /// Monthly income; 0 estimates it from credits
        #[arg(long)]
        income: Option<f64>,

        #[arg(long)]
        json: bool,
    },

    /// Write the ledger as a tab-separated summary
    Export {
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage ~/.moneta/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG > --verbose > info
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .init();

    match cli.command {
        Command::Parse { texts } => ingest_cmd::run_parse(&texts)?,

        Command::Ingest {
            texts,
            files,
            csv,
            source,
            timestamp_ms,
            dry_run,
        } => {
            let cfg = config::load_config()?;
            let args = ingest_cmd::IngestArgs {
                texts,
                files,
                csv,
                source,
                timestamp_ms,
                dry_run,
            };
            ingest_cmd::run_ingest(args, &cfg).await?;
        }

        Command::Report { period, json } => {
            let cfg = config::load_config()?;
            report_cmd::run_report(period, json, &cfg)?;
        }

        Command::Insights { days, json } => report_cmd::run_insights(days, json)?,

        Command::Budget { target, income, json } => {
            let cfg = config::load_config()?;
            report_cmd::run_budget(target, income, json, &cfg)?;
        }

        Command::Export { out } => report_cmd::run_export(out)?,

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}
