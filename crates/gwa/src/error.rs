//! CLI error types.

use gwa_client::GarminError;
use gwa_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Garmin(#[from] GarminError),

    #[error("{0}")]
    Validation(String),
}
