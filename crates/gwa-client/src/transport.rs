//! HTTP transport abstraction.
//!
//! The OAuth handshake and data endpoints only need a single blocking
//! request/response round trip. [`HttpTransport`] captures that so tests can
//! substitute [`MockTransport`](crate::MockTransport) and count network calls.

use std::fmt;
use std::time::Duration;

use ureq::Agent;

use crate::error::GarminError;

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// HTTP verbs used by the Garmin API.
///
/// The same value drives both signing and sending, so the signed method
/// always matches the method on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signed request ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// `Authorization` header value.
    pub authorization: String,
    /// Form body (`application/x-www-form-urlencoded`); POST only.
    pub form: Vec<(String, String)>,
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends signed requests.
///
/// Non-2xx statuses are returned as responses; only network-level failures
/// are errors.
pub trait HttpTransport: Send + Sync {
    /// Perform one request/response round trip.
    ///
    /// # Errors
    ///
    /// Returns [`GarminError::Transport`] on connection, TLS or timeout failures.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, GarminError>;
}

impl<T: HttpTransport> HttpTransport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, GarminError> {
        (**self).send(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Create a transport with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, GarminError> {
        let response = match request.method {
            HttpMethod::Get => self
                .agent
                .get(&request.url)
                .header("Authorization", &request.authorization)
                .header("Accept", "application/json")
                .call()?,
            HttpMethod::Delete => self
                .agent
                .delete(&request.url)
                .header("Authorization", &request.authorization)
                .header("Accept", "application/json")
                .call()?,
            HttpMethod::Post if request.form.is_empty() => self
                .agent
                .post(&request.url)
                .header("Authorization", &request.authorization)
                .send(&[] as &[u8])?,
            HttpMethod::Post => self
                .agent
                .post(&request.url)
                .header("Authorization", &request.authorization)
                .send_form(
                    request
                        .form
                        .iter()
                        .map(|(k, v)| (k.as_str(), v.as_str())),
                )?,
        };

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();
        let body = body_reader.read_to_string()?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_response_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(401, "").is_success());
    }
}
