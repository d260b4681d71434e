//! OAuth 1.0 HMAC-SHA1 authentication for Garmin Connect.
//!
//! This module provides parameter normalization, request signing, the
//! `Authorization` header builder and the three-legged handshake.

mod credentials;
mod handshake;
mod header;
mod params;
mod signature;

pub use credentials::{
    AuthorizationCallback, ClientCredentials, Credentials, TemporaryCredentials, TokenCredentials,
};
pub use handshake::OAuthHandshake;
pub use header::ProtocolHeaderBuilder;
pub use params::{ParameterSet, oauth_encode};
pub use signature::{SignatureMethod, SigningKey, build_signature_base_string};

use tracing::debug;

use crate::error::GarminError;
use crate::transport::{HttpMethod, HttpRequest, HttpTransport};

/// Send a signed request and return the body of a 2xx response.
///
/// `authorization` must have been built for the same `method` and `url`.
pub(crate) fn send_signed<T: HttpTransport + ?Sized>(
    transport: &T,
    method: HttpMethod,
    url: String,
    authorization: String,
    form: Vec<(String, String)>,
    operation: &'static str,
) -> Result<String, GarminError> {
    let request = HttpRequest {
        method,
        url,
        authorization,
        form,
    };

    let response = transport.send(&request)?;
    debug!(status = response.status, "{} {} completed", method, request.url);

    if !response.is_success() {
        return Err(GarminError::Authentication {
            operation,
            status: response.status,
            body: response.body,
        });
    }

    Ok(response.body)
}
