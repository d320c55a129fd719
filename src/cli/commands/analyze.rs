//! Analyze command - submit a contract and report findings

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::application::aggregation::AnalysisAggregate;
use crate::application::reporting::{
    generate_json_report, generate_text_report, generate_vulnerability_report,
    json_report_file_name, text_report_file_name, vulnerability_report_file_name,
};
use crate::domain::entities::VulnerabilityLocation;
use crate::domain::severity::Severity;
use crate::infrastructure::api_clients::{AnalysisApi, AnalysisApiClient};

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the contract source file (.sol or .vy)
    pub path: PathBuf,

    /// Directory to write the JSON and text report artifacts into
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Only display findings at or above this severity (exports always
    /// contain everything)
    #[arg(long)]
    pub min_severity: Option<Severity>,

    /// Also write one report per finding into the export directory
    #[arg(long, requires = "export")]
    pub export_findings: bool,
}

pub async fn run(client: &AnalysisApiClient, args: &AnalyzeArgs) -> anyhow::Result<()> {
    let contents = tokio::fs::read(&args.path)
        .await
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    let file_name = args
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Not a usable file name: {}", args.path.display()))?;

    analyze_bytes(
        client,
        file_name,
        contents,
        args.export.as_deref(),
        args.min_severity,
        args.export_findings,
    )
    .await
}

/// Shared submit-aggregate-report flow, also used for samples
pub(crate) async fn analyze_bytes(
    client: &AnalysisApiClient,
    file_name: &str,
    contents: Vec<u8>,
    export: Option<&Path>,
    min_severity: Option<Severity>,
    export_findings: bool,
) -> anyhow::Result<()> {
    let result = client.submit_for_analysis(file_name, contents).await?;
    let aggregate = AnalysisAggregate::new(result)?;

    print_summary(&aggregate, min_severity);

    if let Some(dir) = export {
        export_reports(&aggregate, dir, export_findings).await?;
    }
    Ok(())
}

fn print_summary(aggregate: &AnalysisAggregate, min_severity: Option<Severity>) {
    let result = aggregate.result();
    println!("Contract: {} ({})", result.contract_name, result.file_name);
    match aggregate.analysis_time() {
        Some(time) => println!("Analyzed: {}", time.format("%Y-%m-%d %H:%M:%S %z")),
        None => println!("Analyzed: {}", result.analysis_timestamp),
    }

    let band = aggregate.risk_band();
    println!(
        "Overall Risk Score: {:.1}/10 [{}] - {}",
        result.overall_risk_score,
        band,
        band.description()
    );
    println!(
        "Deployment Ready: {}",
        if aggregate.deployment_ready() { "yes" } else { "no" }
    );
    println!(
        "Audit Required: {}",
        if aggregate.audit_required() { "yes" } else { "optional" }
    );

    let breakdown = aggregate.counts_by_severity();
    println!(
        "Findings: {} (critical {}, high {}, medium {}, low {}, info {})",
        result.total_vulnerabilities,
        breakdown.critical,
        breakdown.high,
        breakdown.medium,
        breakdown.low,
        breakdown.info
    );
    println!();

    let sorted = aggregate.sorted_vulnerabilities();
    if sorted.is_empty() {
        println!("No vulnerabilities detected. Contract appears secure.");
        return;
    }

    // Severity orders most-severe-first, so "at or above" is <= on the enum
    let mut displayed = 0;
    for vuln in &sorted {
        if min_severity.is_some_and(|min| vuln.severity > min) {
            continue;
        }
        displayed += 1;
        println!(
            "  [{}] {} - {} ({})",
            vuln.severity,
            vuln.title,
            vuln.kind,
            describe_location(&vuln.location)
        );
    }
    if displayed == 0 {
        println!(
            "No findings at or above the requested severity ({} total).",
            sorted.len()
        );
    } else if displayed < sorted.len() {
        println!("  ... {} more below the severity filter", sorted.len() - displayed);
    }
}

fn describe_location(location: &VulnerabilityLocation) -> String {
    let mut out = format!("{}:{}", location.file, location.start_line);
    if let Some(function) = &location.function {
        out.push_str(&format!(" in {}()", function));
    }
    out
}

async fn export_reports(
    aggregate: &AnalysisAggregate,
    dir: &Path,
    export_findings: bool,
) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let contract_name = &aggregate.result().contract_name;

    let json_path = dir.join(json_report_file_name(contract_name));
    tokio::fs::write(&json_path, generate_json_report(aggregate)?)
        .await
        .with_context(|| format!("Failed to write {}", json_path.display()))?;

    let text_path = dir.join(text_report_file_name(contract_name));
    tokio::fs::write(&text_path, generate_text_report(aggregate))
        .await
        .with_context(|| format!("Failed to write {}", text_path.display()))?;

    info!(json = %json_path.display(), text = %text_path.display(), "reports written");
    println!("Wrote {}", json_path.display());
    println!("Wrote {}", text_path.display());

    if export_findings {
        for vuln in aggregate.sorted_vulnerabilities() {
            let path = dir.join(vulnerability_report_file_name(&vuln.id));
            tokio::fs::write(&path, generate_vulnerability_report(vuln))
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
