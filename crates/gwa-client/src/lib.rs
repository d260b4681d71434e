//! Garmin wellness API client with OAuth 1.0 authentication.
//!
//! The crate is organised around the OAuth 1.0 signing engine:
//!
//! - [`ParameterSet`] normalizes and percent-encodes protocol parameters
//! - [`SignatureMethod`] computes HMAC-SHA1 signatures over the base string
//! - [`ProtocolHeaderBuilder`] assembles the signed `Authorization` header
//! - [`OAuthHandshake`] runs the three-legged credential exchange
//! - [`GarminClient`] signs and sends wellness API requests
//!
//! # Example
//!
//! ```ignore
//! use gwa_client::{ClientCredentials, GarminClient, TokenCredentials};
//!
//! let client = GarminClient::new(ClientCredentials::new("key", "secret", "https://app/cb")?);
//! let handshake = client.handshake();
//! let temporary = handshake.request_temporary_credentials()?;
//! let url = handshake.authorization_url(&temporary);
//! // ...redirect the user, receive oauth_token and oauth_verifier...
//! let token = handshake.exchange_for_token_credentials(&temporary, &oauth_token, &verifier)?;
//! let dailies = client.daily_summary(&token, &[("uploadStartTimeInSeconds", "1700000000")])?;
//! ```

mod client;
mod environment;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod oauth;
mod transport;

pub use client::{BackfillType, GarminClient, SummaryType, UserId};
pub use environment::{EnvironmentProfile, Variant};
pub use error::GarminError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
pub use oauth::{
    AuthorizationCallback, ClientCredentials, Credentials, OAuthHandshake, ParameterSet,
    ProtocolHeaderBuilder, SignatureMethod, SigningKey, TemporaryCredentials, TokenCredentials,
    build_signature_base_string, oauth_encode,
};
pub use transport::{
    DEFAULT_TIMEOUT, HttpMethod, HttpRequest, HttpResponse, HttpTransport, UreqTransport,
};
