//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Personal rating server for World of Warships players
#[derive(Parser, Debug)]
#[command(name = "prserver")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the rating server until interrupted
    Serve(RunArgs),

    /// Validate configuration and baseline without serving
    Check(RunArgs),

    /// Send one batch to a running server and print the ratings
    Query(QueryArgs),
}

/// Inputs shared by `serve` and `check`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// TOML configuration file. Without it, defaults plus environment apply.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Dotenv file to load before reading the environment.
    #[arg(short, long)]
    pub env: Option<PathBuf>,

    /// Expected-values JSON file, overriding `baseline.path`.
    #[arg(short, long)]
    pub baseline: Option<PathBuf>,
}

/// Arguments for `query`.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Server address.
    #[arg(short, long, default_value = "127.0.0.1:9000")]
    pub addr: String,

    /// Realm every account belongs to (ASIA, NA, EU, RU).
    #[arg(short, long)]
    pub realm: String,

    /// Seconds to wait for each part of the reply.
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,

    /// Account ids to rate; request ids are assigned 1..=N in this order.
    #[arg(required = true, num_args = 1..)]
    pub account_ids: Vec<u64>,
}
