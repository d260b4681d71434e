//! OAuth 1.0 three-legged handshake with Garmin Connect.
//!
//! 1. Request temporary credentials
//! 2. Redirect the user to the authorization page
//! 3. Exchange the verifier for token credentials
//!
//! The handshake keeps no session: temporary credentials are handed to the
//! caller after step 1 and passed back in for step 3.

use tracing::{info, warn};

use super::credentials::{
    ClientCredentials, CredentialsResponse, TemporaryCredentials, TokenCredentials,
};
use super::header::ProtocolHeaderBuilder;
use super::params::{ParameterSet, oauth_encode};
use super::send_signed;
use crate::environment::EnvironmentProfile;
use crate::error::GarminError;
use crate::transport::{HttpMethod, HttpTransport, UreqTransport};

/// Three-legged OAuth 1.0 flow against one environment variant.
pub struct OAuthHandshake<T = UreqTransport> {
    transport: T,
    signer: ProtocolHeaderBuilder,
    profile: EnvironmentProfile,
}

impl OAuthHandshake<UreqTransport> {
    /// Create a handshake using the default HTTP transport.
    pub fn new(client: ClientCredentials, profile: EnvironmentProfile) -> Self {
        Self::with_transport(client, profile, UreqTransport::new())
    }
}

impl<T: HttpTransport> OAuthHandshake<T> {
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

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Step 1: Request temporary credentials.
    ///
    /// Signed with the client credentials only; the callback URI travels as
    /// `oauth_callback`.
    ///
    /// # Errors
    ///
    /// Returns [`GarminError::Authentication`] on a non-2xx response and
    /// [`GarminError::MalformedResponse`] if the token pair is missing.
    pub fn request_temporary_credentials(&self) -> Result<TemporaryCredentials, GarminError> {
        let url = self.profile.request_token_url();
        let params =
            ParameterSet::new().with("oauth_callback", self.signer.client().callback_uri());

        info!("Requesting temporary credentials from {}", url);
        let header = self
            .signer
            .build_header(HttpMethod::Post.as_str(), &url, None, &params)?;
        let body = send_signed(
            &self.transport,
            HttpMethod::Post,
            url,
            header,
            Vec::new(),
            "temporary credentials request",
        )?;

        let response = CredentialsResponse::parse(&body)?;
        if !response.is_callback_confirmed() {
            warn!("Server did not confirm the callback URI");
        }

        Ok(TemporaryCredentials {
            identifier: response.identifier,
            secret: response.secret,
        })
    }

    /// Step 2: Authorization URL to redirect the user to.
    ///
    /// Both the temporary identifier and the callback URI are percent-encoded.
    #[must_use]
    pub fn authorization_url(&self, temporary: &TemporaryCredentials) -> String {
        format!(
            "{}?oauth_token={}&oauth_callback={}",
            self.profile.auth_url(),
            oauth_encode(&temporary.identifier),
            oauth_encode(self.signer.client().callback_uri())
        )
    }

    /// Step 3: Exchange the verifier for token credentials.
    ///
    /// `echoed_identifier` is the `oauth_token` received with the callback.
    /// It must match the stored temporary credentials; otherwise the exchange
    /// is refused before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`GarminError::SecurityViolation`] on identifier mismatch,
    /// [`GarminError::Authentication`] on a non-2xx response.
    pub fn exchange_for_token_credentials(
        &self,
        temporary: &TemporaryCredentials,
        echoed_identifier: &str,
        verifier: &str,
    ) -> Result<TokenCredentials, GarminError> {
        if echoed_identifier != temporary.identifier {
            warn!("Temporary identifier mismatch, refusing token exchange");
            return Err(GarminError::SecurityViolation {
                expected: temporary.identifier.clone(),
                received: echoed_identifier.to_owned(),
            });
        }

        let url = self.profile.access_token_url();
        let params = ParameterSet::new().with("oauth_verifier", verifier);

        info!("Exchanging verifier for token credentials at {}", url);
        let header = self
            .signer
            .build_header(HttpMethod::Post.as_str(), &url, Some(temporary), &params)?;
        let body = send_signed(
            &self.transport,
            HttpMethod::Post,
            url,
            header,
            vec![("oauth_verifier".to_owned(), verifier.to_owned())],
            "token credentials exchange",
        )?;

        let response = CredentialsResponse::parse(&body)?;
        Ok(TokenCredentials {
            identifier: response.identifier,
            secret: response.secret,
        })
    }
}
