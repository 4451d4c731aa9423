//! CLI entry point for geyser-probe.
//!
//! Connects to a Yellowstone Geyser endpoint, runs the probe battery
//! (three point queries, then one or more subscription runs), and prints
//! the latency report as a table or as JSON.
//!
//! # Usage
//!
//! ```bash
//! geyser-probe --endpoint 203.0.113.7:10000
//! geyser-probe --subscribe-runs 3 --subscribe-timeout-ms 5000 --json
//! GEYSER_ENDPOINT=http://remote:10000 geyser-probe
//! ```

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use geyser_client::{resolve_address, GeyserProbeClient};
use geyser_harness::{ProbePlan, Report};

#[derive(Parser)]
#[command(name = "geyser-probe")]
#[command(about = "Latency probe for Yellowstone Geyser gRPC endpoints", long_about = None)]
struct Cli {
    /// Endpoint address (host:port or http(s) URL). Falls back to the
    /// GEYSER_ENDPOINT environment variable, then http://127.0.0.1:10000.
    #[arg(long)]
    endpoint: Option<String>,

    /// Number of sequential subscription probe runs
    #[arg(long, default_value_t = 1)]
    subscribe_runs: usize,

    /// First-update deadline for each subscription run, in milliseconds
    #[arg(long, default_value_t = 10_000)]
    subscribe_timeout_ms: u64,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let address = resolve_address(cli.endpoint.as_deref())?;
    println!(
        "Probing Geyser endpoint {} (source: {})",
        address,
        address.source().label()
    );

    let mut client = GeyserProbeClient::connect(&address).await?;
    tracing::info!(endpoint = %address, "connected");

    let plan = ProbePlan {
        stream_timeout: Duration::from_millis(cli.subscribe_timeout_ms),
        stream_runs: cli.subscribe_runs,
        ..ProbePlan::default()
    };

    let report = plan.run(&mut client).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report_to_json(&report))?);
    } else {
        print_table(&report);
    }

    Ok(())
}

fn print_table(report: &Report) {
    println!("{}", "─".repeat(78));
    println!("{:<20} {:<7} {:>11}  {}", "probe", "status", "time", "result");
    println!("{}", "─".repeat(78));

    for outcome in report {
        let time = outcome
            .elapsed_ms()
            .map_or_else(|| "-".to_string(), |ms| format!("{ms:.1} ms"));
        let (status, detail) = match outcome.payload() {
            Some(payload) => ("ok", payload.to_string()),
            None => (
                "failed",
                outcome.error_message().unwrap_or_default().to_string(),
            ),
        };
        println!("{:<20} {:<7} {:>11}  {}", outcome.name(), status, time, detail);
    }

    println!("{}", "─".repeat(78));
    println!("{} probes, {} failed", report.len(), report.failures());
}

fn report_to_json(report: &Report) -> serde_json::Value {
    serde_json::Value::Array(
        report
            .iter()
            .map(|outcome| {
                serde_json::json!({
                    "name": outcome.name(),
                    "success": outcome.succeeded(),
                    "time": outcome.elapsed_ms(),
                    "error": outcome.error_message(),
                    "response": outcome.payload().map(ToString::to_string),
                })
            })
            .collect(),
    )
}
