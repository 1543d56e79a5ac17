// =============================================================================
// Alpha Engine — Main Entry Point
// =============================================================================
//
// Thin CLI around the analysis pipeline: load config, read one JSON request
// (price history plus optional external scores), print the report as JSON.
// Fetching that history is an upstream concern; the engine only computes.
// =============================================================================

use anyhow::{bail, Context};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use alpha_engine::{AnalysisReport, AnalysisRequest, EngineConfig};

fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path =
        std::env::var("ALPHA_CONFIG").unwrap_or_else(|_| "engine_config.json".into());
    let config = EngineConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        EngineConfig::default()
    });

    // ── 2. Read the analysis request ─────────────────────────────────────
    let request_path = std::env::args()
        .nth(1)
        .context("usage: alpha-engine <request.json>")?;

    let content = std::fs::read_to_string(&request_path)
        .with_context(|| format!("failed to read request from {request_path}"))?;
    let request: AnalysisRequest = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse request from {request_path}"))?;

    info!(
        ticker = %request.ticker,
        daily_bars = request.daily.len(),
        headlines = request.headlines.len(),
        "request loaded"
    );

    // ── 3. Run the engine ────────────────────────────────────────────────
    match AnalysisReport::generate(&request, &config)? {
        Some(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        None => bail!(
            "no daily price history for '{}'; nothing to analyze",
            request.ticker
        ),
    }
}
