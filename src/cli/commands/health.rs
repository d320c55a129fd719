//! Health command - one-shot availability probe

use clap::Args;

use crate::infrastructure::api_clients::{AnalysisApi, AnalysisApiClient};

/// Arguments for the health command
#[derive(Args, Debug)]
pub struct HealthArgs {}

pub async fn run(client: &AnalysisApiClient, _args: &HealthArgs) -> anyhow::Result<()> {
    let health = client.health_check().await?;

    let status = if health.status.is_empty() {
        "healthy"
    } else {
        health.status.as_str()
    };
    println!("{} ({})", status, client.base_url());

    let mut services: Vec<_> = health.services.iter().collect();
    services.sort();
    for (service, state) in services {
        println!("  {}: {}", service, state);
    }
    Ok(())
}
