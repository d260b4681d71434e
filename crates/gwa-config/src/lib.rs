//! Configuration management for gwa.
//!
//! Parses `gwa.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: every string in the `[garmin]` section.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the API environment variant.
    pub variant: Option<String>,
    /// Override the HTTP timeout.
    pub timeout_secs: Option<u64>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "gwa.toml";

/// Variant names accepted in `garmin.variant`.
const VARIANTS: [&str; 2] = ["international", "regional"];

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Garmin consumer and token credentials.
    pub garmin: Option<GarminConfig>,
    /// HTTP client settings.
    pub http: HttpConfig,

    /// Variant forced from the command line; wins over `garmin.variant`.
    #[serde(skip)]
    variant_override: Option<String>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Garmin consumer configuration.
#[derive(Debug, Deserialize)]
pub struct GarminConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    /// Where Garmin redirects the user after authorization.
    pub callback_uri: String,
    /// `international` or `regional`.
    #[serde(default = "default_variant")]
    pub variant: String,
    /// Token credentials written after `gwa auth generate-tokens`.
    pub access_token: Option<String>,
    pub access_secret: Option<String>,
}

impl GarminConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.consumer_key, "garmin.consumer_key")?;
        require_non_empty(&self.consumer_secret, "garmin.consumer_secret")?;
        require_non_empty(&self.callback_uri, "garmin.callback_uri")?;
        require_http_url(&self.callback_uri, "garmin.callback_uri")?;
        require_variant(&self.variant, "garmin.variant")?;
        Ok(())
    }

    /// Stored token credentials as `(access_token, access_secret)`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if either value is missing or empty.
    pub fn token(&self) -> Result<(&str, &str), ConfigError> {
        let missing = || {
            ConfigError::Validation(
                "garmin.access_token and garmin.access_secret are required; \
                 run `gwa auth generate-tokens` first"
                    .to_owned(),
            )
        };
        let token = self.access_token.as_deref().ok_or_else(missing)?;
        let secret = self.access_secret.as_deref().ok_or_else(missing)?;
        require_non_empty(token, "garmin.access_token")?;
        require_non_empty(secret, "garmin.access_secret")?;
        Ok((token, secret))
    }
}

fn default_variant() -> String {
    "international".to_owned()
}

/// HTTP client configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Global request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`garmin.consumer_key`").
        field: String,
        /// Error message (e.g., "${`GARMIN_CONSUMER_KEY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

fn require_variant(value: &str, field: &str) -> Result<(), ConfigError> {
    if !VARIANTS.contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{field} must be one of {}, got '{value}'",
            VARIANTS.join(", ")
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `gwa.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a CLI override is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(variant) = &settings.variant {
            self.variant_override = Some(variant.clone());
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.http.timeout_secs = timeout_secs;
        }
    }

    /// Active API environment variant.
    ///
    /// A `--variant` override wins, then `garmin.variant`, then `international`.
    #[must_use]
    pub fn variant(&self) -> &str {
        self.variant_override
            .as_deref()
            .or_else(|| self.garmin.as_ref().map(|g| g.variant.as_str()))
            .unwrap_or("international")
    }

    /// Get validated Garmin configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_garmin(&self) -> Result<&GarminConfig, ConfigError> {
        let garmin = self.garmin.as_ref().ok_or_else(|| {
            ConfigError::Validation("[garmin] section required in config".into())
        })?;
        garmin.validate()?;
        Ok(garmin)
    }

    /// Get validated Garmin configuration together with its stored token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is invalid or the
    /// token credentials are absent.
    pub fn require_token(&self) -> Result<(&GarminConfig, (&str, &str)), ConfigError> {
        let garmin = self.require_garmin()?;
        Ok((garmin, garmin.token()?))
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Only sections that are present are checked; commands that need
    /// Garmin credentials call [`Config::require_garmin`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if let Some(variant) = &self.variant_override {
            require_variant(variant, "--variant")?;
        }
        if let Some(garmin) = &self.garmin {
            require_variant(&garmin.variant, "garmin.variant")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let Some(ref mut garmin) = self.garmin else {
            return Ok(());
        };

        garmin.consumer_key = expand::expand_env(&garmin.consumer_key, "garmin.consumer_key")?;
        garmin.consumer_secret =
            expand::expand_env(&garmin.consumer_secret, "garmin.consumer_secret")?;
        garmin.callback_uri = expand::expand_env(&garmin.callback_uri, "garmin.callback_uri")?;
        garmin.variant = expand::expand_env(&garmin.variant, "garmin.variant")?;
        if let Some(ref token) = garmin.access_token {
            garmin.access_token = Some(expand::expand_env(token, "garmin.access_token")?);
        }
        if let Some(ref secret) = garmin.access_secret {
            garmin.access_secret = Some(expand::expand_env(secret, "garmin.access_secret")?);
        }

        Ok(())
    }
}
