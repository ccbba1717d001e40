//! Handler for the `serve` command.

use tracing::{error, info};

use super::command::RunArgs;
use super::load_config;
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// Run the server until Ctrl-C.
///
/// Configuration errors happen before logging exists and are left to the
/// caller to print; later startup errors are also logged.
///
/// # Errors
///
/// Returns an error if startup fails.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let config = load_config(args)?;
    config.init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "prserver starting");

    let served = bootstrap::run(&config, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
        }
    })
    .await;
    if let Err(err) = served {
        error!(error = %err, "Startup failed");
        return Err(err);
    }

    info!("prserver stopped");
    Ok(())
}
