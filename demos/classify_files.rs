//! Classifies files given on the command line and prints each result as JSON.
//!
//! Configuration comes from the environment:
//! - `VIRUSTOTAL_API_URL` - lookup endpoint (defaults to VirusTotal v3)
//! - `VIRUSTOTAL_API_KEY` - lookup credential, also seeds the heuristic
//! - `ENABLE_LOOKUP_FALLBACK` - `false` disables the heuristic fallback
//! - `LOOKUP_TIMEOUT_MS` - lookup timeout in milliseconds
//!
//! Run with: cargo run --example classify_files -- <file>...

use scanverdict::prelude::*;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn config_from_env() -> EngineConfig {
    let mut config = EngineConfig::new();

    if let Ok(endpoint) = std::env::var("VIRUSTOTAL_API_URL") {
        config = config.with_lookup_endpoint(endpoint);
    }
    if let Ok(key) = std::env::var("VIRUSTOTAL_API_KEY") {
        config = config.with_credential(key);
    }
    if let Ok(flag) = std::env::var("ENABLE_LOOKUP_FALLBACK") {
        config = config.with_fallback_enabled(!flag.trim().eq_ignore_ascii_case("false"));
    }
    if let Some(ms) = std::env::var("LOOKUP_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
    {
        config = config.with_lookup_timeout(Duration::from_millis(ms));
    }

    config
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scanverdict=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: classify_files <file>...");
        std::process::exit(2);
    }

    let config = config_from_env();
    if !config.has_credential() {
        tracing::warn!("No VIRUSTOTAL_API_KEY set; every lookup will miss");
    }

    let engine = ScanEngine::builder().with_config(config).build()?;

    for path in paths {
        let result = engine.classify_path(&path).await;
        println!("{}", serde_json::to_string_pretty(&result.to_json())?);
    }

    Ok(())
}
