//! OAuth 1.0 credential types.

use std::fmt;

use crate::error::GarminError;

use super::params::parse_pairs;

/// An identifier/secret pair that can sign requests on behalf of a user.
pub trait Credentials {
    fn identifier(&self) -> &str;
    fn secret(&self) -> &str;
}

/// Consumer credentials issued to the application by Garmin.
#[derive(Clone)]
pub struct ClientCredentials {
    identifier: String,
    secret: String,
    callback_uri: String,
}

impl ClientCredentials {
    /// Create client credentials.
    ///
    /// # Errors
    ///
    /// Returns [`GarminError::InvalidConfiguration`] if any value is empty.
    pub fn new(
        identifier: impl Into<String>,
        secret: impl Into<String>,
        callback_uri: impl Into<String>,
    ) -> Result<Self, GarminError> {
        let credentials = Self {
            identifier: identifier.into(),
            secret: secret.into(),
            callback_uri: callback_uri.into(),
        };
        require_non_empty(&credentials.identifier, "consumer key")?;
        require_non_empty(&credentials.secret, "consumer secret")?;
        require_non_empty(&credentials.callback_uri, "callback URI")?;
        Ok(credentials)
    }

    /// Consumer key.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Consumer secret.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn callback_uri(&self) -> &str {
        &self.callback_uri
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .field("callback_uri", &self.callback_uri)
            .finish()
    }
}

/// Short-lived credentials from the temporary-credentials request.
///
/// The caller keeps them between redirecting the user and receiving the
/// callback; they are consumed by the token-credentials exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct TemporaryCredentials {
    pub identifier: String,
    pub secret: String,
}

/// Long-lived token credentials authorizing data requests for one user.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenCredentials {
    pub identifier: String,
    pub secret: String,
}

impl TemporaryCredentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl TokenCredentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

macro_rules! impl_credentials {
    ($ty:ident) => {
        impl Credentials for $ty {
            fn identifier(&self) -> &str {
                &self.identifier
            }

            fn secret(&self) -> &str {
                &self.secret
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($ty))
                    .field("identifier", &self.identifier)
                    .field("secret", &"<redacted>")
                    .finish()
            }
        }
    };
}

impl_credentials!(TemporaryCredentials);
impl_credentials!(TokenCredentials);

/// Identifier/secret pair from a form-encoded credentials response body.
pub(crate) struct CredentialsResponse {
    pub(crate) identifier: String,
    pub(crate) secret: String,
    pub(crate) callback_confirmed: Option<bool>,
}

impl CredentialsResponse {
    /// Parse `oauth_token`, `oauth_token_secret` and `oauth_callback_confirmed`.
    pub(crate) fn parse(body: &str) -> Result<Self, GarminError> {
        let params = parse_pairs(body.trim());

        Ok(Self {
            identifier: required(&params, "oauth_token")?,
            secret: required(&params, "oauth_token_secret")?,
            callback_confirmed: lookup(&params, "oauth_callback_confirmed")
                .map(|v| v == "true"),
        })
    }

    /// Only an explicit `oauth_callback_confirmed=true` counts.
    pub(crate) fn is_callback_confirmed(&self) -> bool {
        self.callback_confirmed == Some(true)
    }
}

/// Parameters Garmin appends to the callback URI after the user authorizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationCallback {
    /// Echoed temporary identifier; must match the stored one.
    pub token: String,
    pub verifier: String,
}

impl AuthorizationCallback {
    /// Extract `oauth_token` and `oauth_verifier` from a redirect URL.
    ///
    /// A bare query string (without `?`) is accepted as well.
    ///
    /// # Errors
    ///
    /// Returns [`GarminError::MalformedResponse`] if either parameter is missing.
    pub fn from_url(url: &str) -> Result<Self, GarminError> {
        let url = url.trim();
        let query = url.split_once('?').map_or(url, |(_, query)| query);
        let query = query.split('#').next().unwrap_or(query);
        let params = parse_pairs(query);

        Ok(Self {
            token: required(&params, "oauth_token")?,
            verifier: required(&params, "oauth_verifier")?,
        })
    }
}

fn lookup(params: &[(String, String)], key: &str) -> Option<String> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

fn required(params: &[(String, String)], key: &str) -> Result<String, GarminError> {
    match lookup(params, key) {
        None => Err(GarminError::MalformedResponse(format!("missing {key}"))),
        Some(value) if value.is_empty() => {
            Err(GarminError::MalformedResponse(format!("empty {key}")))
        }
        Some(value) => Ok(value),
    }
}

fn require_non_empty(value: &str, field: &str) -> Result<(), GarminError> {
    if value.is_empty() {
        return Err(GarminError::InvalidConfiguration(format!(
            "{field} cannot be empty"
        )));
    }
    Ok(())
}
