//! Garmin deployment variants.
//!
//! Garmin runs two independent deployments of its wellness platform. Each
//! variant fixes three URLs that must never be mixed: the connect API (used
//! for the OAuth handshake), the wellness REST API and the authorization page.

use std::fmt;
use std::str::FromStr;

use crate::error::GarminError;

const INTERNATIONAL_API_URL: &str = "https://connectapi.garmin.com/";
const INTERNATIONAL_USER_API_URL: &str = "https://healthapi.garmin.com/wellness-api/rest/";
const INTERNATIONAL_AUTH_URL: &str = "http://connect.garmin.com/oauthConfirm";

const REGIONAL_API_URL: &str = "https://connectapi.garmin.cn/";
const REGIONAL_USER_API_URL: &str = "https://gcs-wellness.garmin.cn/wellness-api/rest/";
const REGIONAL_AUTH_URL: &str = "http://connect.garmin.cn/oauthConfirm";

/// Deployment variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Global deployment (`garmin.com`).
    #[default]
    International,
    /// Regional deployment (`garmin.cn`).
    Regional,
}

impl Variant {
    /// Configuration name of the variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::International => "international",
            Self::Regional => "regional",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = GarminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "international" => Ok(Self::International),
            "regional" => Ok(Self::Regional),
            other => Err(GarminError::InvalidConfiguration(format!(
                "invalid variant '{other}', must be 'international' or 'regional'"
            ))),
        }
    }
}

/// The three URLs of one deployment variant.
///
/// A profile is an immutable value; switching variants produces a new
/// profile rather than mutating URLs in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentProfile {
    variant: Variant,
    api_url: &'static str,
    user_api_url: &'static str,
    auth_url: &'static str,
}

impl EnvironmentProfile {
    /// Profile for the given variant.
    #[must_use]
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::International => Self {
                variant,
                api_url: INTERNATIONAL_API_URL,
                user_api_url: INTERNATIONAL_USER_API_URL,
                auth_url: INTERNATIONAL_AUTH_URL,
            },
            Variant::Regional => Self {
                variant,
                api_url: REGIONAL_API_URL,
                user_api_url: REGIONAL_USER_API_URL,
                auth_url: REGIONAL_AUTH_URL,
            },
        }
    }

    /// Profile for a variant given by its configuration name.
    ///
    /// # Errors
    ///
    /// Returns [`GarminError::InvalidConfiguration`] for anything other than
    /// `international` or `regional`.
    pub fn select(variant: &str) -> Result<Self, GarminError> {
        variant.parse().map(Self::for_variant)
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Connect API base URL (OAuth endpoints live here).
    pub fn api_url(&self) -> &'static str {
        self.api_url
    }

    /// Wellness REST API base URL.
    pub fn user_api_url(&self) -> &'static str {
        self.user_api_url
    }

    /// Authorization page the end user is redirected to.
    pub fn auth_url(&self) -> &'static str {
        self.auth_url
    }

    /// Temporary-credentials endpoint.
    pub fn request_token_url(&self) -> String {
        format!("{}oauth-service/oauth/request_token", self.api_url)
    }

    /// Token-credentials endpoint.
    pub fn access_token_url(&self) -> String {
        format!("{}oauth-service/oauth/access_token", self.api_url)
    }
}

impl Default for EnvironmentProfile {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}
