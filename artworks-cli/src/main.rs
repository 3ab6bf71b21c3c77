mod config;
mod error;
mod paths;
mod render;
mod shell;

use std::fs::File;
use std::process::ExitCode;

use artworks_lib::ArtworksClient;
use artworks_lib::selection::SelectionSession;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::config::Config;
use crate::error::CliError;
use crate::paths::LogDir;
use crate::shell::Shell;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CliError> {
    let config = Config::from_env()?;
    init_logging(config.log_level)?;
    log::info!(
        "Starting with {} ({} per page, {:?} timeout)",
        config.api_url,
        config.page_size,
        config.timeout
    );

    let client = ArtworksClient::builder()
        .base_url(&config.api_url)
        .page_size(config.page_size)
        .timeout(config.timeout)
        .build()?;

    let result = Shell::new(SelectionSession::new(client)).run().await;
    log::info!("Shutting down");
    result
}

fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    let log_file = match LogDir::user() {
        Some(logs) => logs.start_session()?,
        None => File::create("artworks.log")?,
    };
    WriteLogger::init(level, simplelog::Config::default(), log_file)?;
    Ok(())
}
