//! Fixture API Server Entry Point

use clap::Parser;
use fixture_api::cli::Cli;
use fixture_api::shutdown::ShutdownController;
use fixture_api::{logging, server};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(&cli.log_level) {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let config = cli.into_config();
    if let Err(e) = server::run(config, ShutdownController::default()).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
