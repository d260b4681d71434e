//! Garmin wellness REST API client.
//!
//! Provides a sync HTTP client for the wellness API with OAuth 1.0
//! HMAC-SHA1 authentication. Every call is signed with the caller's
//! [`TokenCredentials`]; response bodies are passed through as raw JSON.

mod backfill;
mod summaries;
mod user;

pub use backfill::BackfillType;
pub use summaries::SummaryType;
pub use user::UserId;

use tracing::info;

use crate::environment::{EnvironmentProfile, Variant};
use crate::error::GarminError;
use crate::oauth::{
    ClientCredentials, OAuthHandshake, ParameterSet, ProtocolHeaderBuilder, TokenCredentials,
    oauth_encode, send_signed,
};
use crate::transport::{HttpMethod, HttpTransport, UreqTransport};

/// Garmin wellness API client.
pub struct GarminClient<T = UreqTransport> {
    transport: T,
    signer: ProtocolHeaderBuilder,
    profile: EnvironmentProfile,
}

impl GarminClient<UreqTransport> {
    /// Create a client for the international variant using the default HTTP transport.
    pub fn new(client: ClientCredentials) -> Self {
        Self::with_transport(client, EnvironmentProfile::default(), UreqTransport::new())
    }
}

impl<T: HttpTransport> GarminClient<T> {
    pub fn with_transport(
        client: ClientCredentials,
        profile: EnvironmentProfile,
        transport: T,
    ) -> Self {
        Self {
            transport,
            signer: ProtocolHeaderBuilder::new(client),
            profile,
        }
    }

    pub fn profile(&self) -> &EnvironmentProfile {
        &self.profile
    }

    pub fn variant(&self) -> Variant {
        self.profile.variant()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Switch to another deployment variant by name.
    ///
    /// All three URLs are replaced together. On error the current profile is kept.
    ///
    /// # Errors
    ///
    /// Returns [`GarminError::InvalidConfiguration`] for an unknown variant.
    pub fn select_variant(&mut self, variant: &str) -> Result<(), GarminError> {
        self.profile = EnvironmentProfile::select(variant)?;
        info!("Using {} variant", self.profile.variant());
        Ok(())
    }

    pub fn use_international(&mut self) {
        self.profile = EnvironmentProfile::for_variant(Variant::International);
    }

    pub fn use_regional(&mut self) {
        self.profile = EnvironmentProfile::for_variant(Variant::Regional);
    }

    /// Handshake sharing this client's credentials and variant.
    pub fn handshake(&self) -> OAuthHandshake<&T> {
        OAuthHandshake::with_transport(self.signer.client().clone(), self.profile, &self.transport)
    }

    /// Build a wellness API URL from a relative path and query parameters.
    fn user_api_url(&self, path: &str, query: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}", self.profile.user_api_url(), path);
        if !query.is_empty() {
            let query = query
                .iter()
                .map(|(k, v)| format!("{}={}", oauth_encode(k), oauth_encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    /// Sign and send a request to the wellness API, returning the raw body.
    fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        token: &TokenCredentials,
        operation: &'static str,
    ) -> Result<String, GarminError> {
        let url = self.user_api_url(path, query);
        let header = self
            .signer
            .build_header(method.as_str(), &url, Some(token), &ParameterSet::new())?;
        send_signed(&self.transport, method, url, header, Vec::new(), operation)
    }
}
