use clap::Parser;
use prserver::adapter::inbound::cli::command::{Cli, Commands};
use prserver::adapter::inbound::cli::{check, query, serve};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Serve(args) => serve::execute(args).await,
        Commands::Check(args) => check::execute(args),
        Commands::Query(args) => query::execute(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
