//! CLI command implementations.

pub(crate) mod auth;
mod backfill;
mod fetch;
pub(crate) mod user;

use std::path::PathBuf;
use std::time::Duration;

use gwa_client::{
    ClientCredentials, EnvironmentProfile, GarminClient, TokenCredentials, UreqTransport,
};
use gwa_config::{CliSettings, Config};
use tracing::debug;

use crate::error::CliError;

pub(crate) use auth::AuthCommand;
pub(crate) use backfill::BackfillArgs;
pub(crate) use fetch::FetchArgs;

/// Options shared by every subcommand.
pub(crate) struct GlobalArgs {
    pub(crate) config: Option<PathBuf>,
    pub(crate) variant: Option<String>,
    pub(crate) timeout_secs: Option<u64>,
}

impl GlobalArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            variant: self.variant.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Load `gwa.toml` with the `--variant` and `--timeout` overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        debug!(
            config_path = ?config.config_path,
            variant = config.variant(),
            timeout_secs = config.http.timeout_secs,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Client plus the stored token credentials, for the data endpoints.
    pub(crate) fn connect(&self) -> Result<(GarminClient, TokenCredentials), CliError> {
        let config = self.load_config()?;
        let client = build_client(&config)?;
        let (_, (access_token, access_secret)) = config.require_token()?;
        Ok((client, TokenCredentials::new(access_token, access_secret)))
    }
}

/// Build a client for the configured consumer and variant.
pub(crate) fn build_client(config: &Config) -> Result<GarminClient, CliError> {
    let garmin = config.require_garmin()?;
    let credentials = ClientCredentials::new(
        garmin.consumer_key.as_str(),
        garmin.consumer_secret.as_str(),
        garmin.callback_uri.as_str(),
    )?;
    let transport = UreqTransport::with_timeout(Duration::from_secs(config.http.timeout_secs));

    let mut client =
        GarminClient::with_transport(credentials, EnvironmentProfile::default(), transport);
    client.select_variant(config.variant())?;
    Ok(client)
}

/// Reject empty or inverted `--start`/`--end` windows.
fn validate_range(start: u64, end: u64) -> Result<(), CliError> {
    if start >= end {
        return Err(CliError::Validation(format!(
            "--start ({start}) must be before --end ({end})"
        )));
    }
    Ok(())
}
