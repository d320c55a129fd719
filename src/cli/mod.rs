//! scaudit CLI - contract analysis from the command line
//!
//! Thin consumer of the library: submits a contract (or a bundled sample),
//! prints the aggregated summary, and writes the export artifacts. All
//! logic lives in the library layers.

pub mod commands;

use clap::{Parser, Subcommand};
use std::time::Duration;

use crate::config::Config;
use crate::infrastructure::api_clients::AnalysisApiClient;

/// scaudit - AI-powered vulnerability analysis for smart contracts
#[derive(Parser, Debug)]
#[command(
    name = "scaudit",
    version,
    about = "AI-powered vulnerability detection for smart contracts"
)]
pub struct Cli {
    /// Analysis service URL (overrides configuration)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides configuration)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a contract file for analysis
    #[command(visible_alias = "a")]
    Analyze(commands::analyze::AnalyzeArgs),

    /// Browse the service's sample contract catalog
    #[command(visible_alias = "s")]
    Samples(commands::samples::SamplesArgs),

    /// Check availability of the analysis service
    Health(commands::health::HealthArgs),
}

/// Build the client and dispatch the selected command
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let base_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| config.api.base_url.clone());
    let timeout = cli
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.api.timeout());
    let client = AnalysisApiClient::with_timeout(base_url, timeout)?;

    match cli.command {
        Commands::Analyze(ref args) => commands::analyze::run(&client, args).await,
        Commands::Samples(ref args) => commands::samples::run(&client, args).await,
        Commands::Health(ref args) => commands::health::run(&client, args).await,
    }
}
