//! scaudit - Main application entry point

use clap::Parser;

use scaudit::cli::{self, Cli};
use scaudit::{init_tracing, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        // Only warn if it's not a "file not found" error
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let cli = Cli::parse();
    let config = Config::load()?;
    init_tracing(&config.logging)?;

    cli::run(cli, config).await
}
