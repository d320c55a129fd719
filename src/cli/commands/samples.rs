//! Samples command - browse and analyze the service's sample catalog

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use super::analyze::analyze_bytes;
use crate::infrastructure::api_clients::{AnalysisApi, AnalysisApiClient};

/// Arguments for the samples command
#[derive(Args, Debug)]
pub struct SamplesArgs {
    /// Sample name to fetch; omit to list the catalog
    pub name: Option<String>,

    /// Submit the fetched sample for analysis
    #[arg(long)]
    pub analyze: bool,

    /// Directory to write artifacts into (sample source, analysis reports)
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub async fn run(client: &AnalysisApiClient, args: &SamplesArgs) -> anyhow::Result<()> {
    match &args.name {
        None => list(client).await,
        Some(name) => fetch(client, name, args).await,
    }
}

async fn list(client: &AnalysisApiClient) -> anyhow::Result<()> {
    let samples = client.list_sample_contracts().await?;
    if samples.is_empty() {
        println!("No sample contracts available.");
        return Ok(());
    }
    for sample in &samples {
        println!("{}", sample.name);
        if !sample.description.is_empty() {
            println!("  {}", sample.description);
        }
        if !sample.vulnerability_types.is_empty() {
            println!("  Expected: {}", sample.vulnerability_types.join(", "));
        }
    }
    Ok(())
}

async fn fetch(
    client: &AnalysisApiClient,
    name: &str,
    args: &SamplesArgs,
) -> anyhow::Result<()> {
    let sample = client.fetch_sample_contract(name).await?;
    let content = sample
        .content
        .ok_or_else(|| anyhow::anyhow!("Sample {} has no content", name))?;

    if let Some(dir) = &args.export {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(&sample.name);
        tokio::fs::write(&path, &content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    if args.analyze {
        analyze_bytes(
            client,
            &sample.name,
            content.into_bytes(),
            args.export.as_deref(),
            None,
            false,
        )
        .await?;
    } else if args.export.is_none() {
        println!("{}", content);
    }
    Ok(())
}
