//! Handler for the `check` command.

use std::fmt::Display;

use super::command::RunArgs;
use super::load_config;
use crate::error::Result;
use crate::infrastructure::bootstrap;

fn field(label: &str, value: impl Display) {
    println!("  {label:<18}{value}");
}

/// Validate configuration, credentials and baseline, then print a summary.
///
/// # Errors
///
/// Returns the first problem that would stop `serve` from starting.
pub fn execute(args: &RunArgs) -> Result<()> {
    let config = load_config(args)?;
    config.application_id()?;
    let baseline = bootstrap::load_baseline(&config)?;

    println!("Configuration");
    field("listen", config.server.addr());
    field("rate limit", format!("{}/s", config.upstream.rate_limit));
    field("request deadline", format!("{:?}", config.server.request_deadline()));
    for (realm, endpoint) in &config.upstream.realms {
        field(&format!("realm {realm}"), endpoint);
    }

    println!("Baseline");
    field("path", config.baseline.path.display());
    field("ships", baseline.len());
    if let Some(at) = baseline.generated_at() {
        field("generated", at.to_rfc3339());
    }

    println!("OK");
    Ok(())
}
