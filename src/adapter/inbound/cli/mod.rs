//! CLI module graph.

pub mod check;
pub mod command;
pub mod query;
pub mod serve;

use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

use command::RunArgs;

/// Load the dotenv file and configuration named by `args`.
///
/// An explicit `--env` file must exist; the default `.env` is optional.
///
/// # Errors
///
/// Returns an error if the dotenv file or the configuration cannot be
/// loaded.
pub fn load_config(args: &RunArgs) -> Result<Config> {
    match &args.env {
        Some(path) => {
            dotenvy::from_path(path).map_err(ConfigError::EnvFile)?;
        }
        None => {
            let _ = dotenvy::dotenv();
        }
    }

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };
    if let Some(path) = &args.baseline {
        config.baseline.path.clone_from(path);
    }
    Ok(config)
}
