//! autostop: stops idle AWS compute resources to halt billing
//!
//! Runs one shutdown sweep across EC2 instances, RDS instances and clusters,
//! ECS services and tasks, and Auto Scaling groups. Meant to be invoked on a
//! schedule during idle periods; each run is stateless.

use anyhow::{Context, Result};
use autostop::config::StopConfig;
use autostop::orchestrator;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "autostop")]
#[command(about = "Stops idle AWS compute resources (EC2, RDS, ECS, ASG)")]
#[command(version)]
struct Args {
    /// AWS region (default: SDK region chain)
    #[arg(long)]
    region: Option<String>,

    /// Cap on concurrent stop commands per fan-out (default: unbounded)
    #[arg(long)]
    max_in_flight: Option<usize>,

    /// Write the final report as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = StopConfig {
        region: args.region,
        max_in_flight: args.max_in_flight,
        output: args.output,
    };

    let report = orchestrator::run(&config).await;

    if let Some(path) = &config.output {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "Wrote report");
    }

    if report.has_failures() {
        anyhow::bail!(
            "shutdown sweep completed with {} failure(s)",
            report.failure_count()
        );
    }

    Ok(())
}
