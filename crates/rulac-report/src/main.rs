//! CLI entry point for the rulac-report builder.
//!
//! Builds one report and writes it as JSON to stdout. Logs go to stderr.

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use rulac_core::config::load_layered;
use rulac_core::{PartyScope, ReportConfig};
use rulac_graph::{GraphClient, GraphConfig, GraphError};
use rulac_report::{ReportEngine, ReportRequest};

#[derive(Parser)]
#[command(name = "rulac-report")]
#[command(about = "Armed conflict reports by UN M49 region from the RULAC graph")]
struct Cli {
    /// UN M49 region code (e.g., 150 for Europe).
    #[arg(short, long)]
    region: String,

    /// Conflict classification label, e.g. "Military Occupation".
    #[arg(short = 't', long)]
    conflict_type: String,

    /// Print the intermediate aggregate instead of the report.
    #[arg(long)]
    aggregate: bool,

    /// Override the configured party scope.
    #[arg(long, value_enum)]
    party_scope: Option<ScopeArg>,

    /// Emit logs as JSON.
    #[arg(long)]
    json_logs: bool,

    /// Config file prefix (default: rulac).
    #[arg(short, long, default_value = "rulac")]
    config: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    RegionWide,
    PerConflict,
}

impl From<ScopeArg> for PartyScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::RegionWide => PartyScope::RegionWide,
            ScopeArg::PerConflict => PartyScope::PerConflict,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if cli.json_logs {
        fmt().with_env_filter(filter).json().with_writer(std::io::stderr).init();
    } else {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }

    let cfg = load_layered(&cli.config)?;
    let mut report_config = ReportConfig::from_config(&cfg)?;
    if let Some(scope) = cli.party_scope {
        report_config.party_scope = scope.into();
    }
    let graph_config = load_graph_config(&cfg)?;

    let request = ReportRequest::new(cli.region, cli.conflict_type);
    let engine = ReportEngine::new(report_config);
    // Reject bad input before touching the database.
    request.validate(engine.config().strict_classification)?;

    let client = GraphClient::connect(&graph_config).await?;
    let snapshot = client.snapshot().await?;

    let output = if cli.aggregate {
        engine
            .aggregate(&snapshot, &request)
            .await
            .map(|agg| serde_json::to_string_pretty(&agg))
    } else {
        engine
            .build(&snapshot, &request)
            .await
            .map(|report| serde_json::to_string_pretty(&report))
    };
    let closed = snapshot.close().await;

    println!("{}", settle(output, closed)??);
    Ok(())
}

/// Read the `[neo4j]` section. Only a missing section falls back to defaults.
fn load_graph_config(cfg: &config::Config) -> anyhow::Result<GraphConfig> {
    match cfg.get::<GraphConfig>("neo4j") {
        Ok(graph_config) => Ok(graph_config),
        Err(config::ConfigError::NotFound(_)) => {
            tracing::debug!("No [neo4j] config, using defaults");
            Ok(GraphConfig::default())
        }
        Err(e) => Err(anyhow::anyhow!("invalid [neo4j] config: {e}")),
    }
}

/// The build outcome wins over a failure to end the snapshot.
fn settle<T>(
    built: rulac_report::error::Result<T>,
    closed: Result<(), GraphError>,
) -> anyhow::Result<T> {
    let value = built?;
    if let Err(e) = closed {
        tracing::warn!(error = %e, "Failed to close read snapshot");
    }
    Ok(value)
}
