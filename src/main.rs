//! Kudos - review helpfulness scoring and micro-incentive payouts
//!
//! Entry point for the `kudos` binary: one-shot scoring and payout commands,
//! the stdio tool server for agents, and the HTTP feedback server.

mod cli;

use clap::{Parser, Subcommand};
use kudos_core::{error::Result, KudosConfig};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kudos")]
#[command(about = "Score feedback for helpfulness and pay reviewers for it", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Config file (default: <config dir>/kudos/config.toml)
    #[arg(short, long, env = "KUDOS_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a review for helpfulness
    Score {
        /// Review text (read from stdin when omitted or "-")
        text: Option<String>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Calculate the incentive for a helpfulness score (1-100)
    #[command(allow_negative_numbers = true)]
    Incentive {
        score: f64,
    },

    /// Score a review, calculate its incentive and record the payout
    Process {
        /// Wallet address of the reviewer
        #[arg(short, long)]
        recipient: String,

        /// Identifier of the reviewed service
        #[arg(short, long)]
        service: String,

        /// Review text (read from stdin when omitted or "-")
        text: Option<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a timestamped payout record without recording it
    PayoutJson {
        #[arg(short, long)]
        incentive: String,

        #[arg(short, long)]
        recipient: String,

        #[arg(short, long)]
        service: String,
    },

    /// List recorded payouts
    Payouts {
        /// Payout file (default: payout.file_path from config)
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Start the tool server (JSON-RPC over stdio)
    Serve,

    /// Start the HTTP API server
    ApiServer {
        /// Listen address (default: api.addr from config)
        #[arg(long)]
        addr: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: cli::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Our crates at the requested level, HTTP plumbing quieter
    let filter = EnvFilter::new(format!(
        "kudos={level},kudos_core={level},tower_http={level},hyper=warn,reqwest=warn",
        level = level.as_str().to_lowercase()
    ));

    // Logs go to stderr: stdout belongs to command output and the tool server
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("Kudos v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = KudosConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Score { text, json } => cli::score::handle(&config, text, json).await,
        Commands::Incentive { score } => cli::incentive::handle(score).await,
        Commands::Process {
            recipient,
            service,
            text,
            json,
        } => cli::process::handle(&config, recipient, service, text, json).await,
        Commands::PayoutJson {
            incentive,
            recipient,
            service,
        } => cli::payout_json::handle(incentive, recipient, service).await,
        Commands::Payouts { file, json } => cli::payouts::handle(&config, file, json).await,
        Commands::Serve => cli::serve::handle(&config).await,
        Commands::ApiServer { addr } => cli::api_server::handle(&config, addr).await,
        Commands::Config { action } => cli::config::handle(&config, action).await,
    }
}
