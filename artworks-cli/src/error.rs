//! Shell error type.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Artworks(#[from] artworks_lib::error::Error),
}
