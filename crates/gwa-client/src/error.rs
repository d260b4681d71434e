//! Error types for the Garmin wellness API client.

/// Error from OAuth signing, the credential handshake, or a data request.
#[derive(Debug, thiserror::Error)]
pub enum GarminError {
    /// Bad environment variant, malformed credentials or request URI.
    ///
    /// Always detected before any network call is made.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Temporary identifier echoed by the authorization callback does not
    /// match the one issued by the temporary-credentials request.
    #[error(
        "temporary identifier passed back by server ({received}) does not match \
         stored temporary credentials ({expected})"
    )]
    SecurityViolation {
        /// Identifier of the stored temporary credentials.
        expected: String,
        /// Identifier received with the callback.
        received: String,
    },

    /// Server answered a credential exchange or data request with a non-2xx status.
    #[error("{operation} failed ({status}): {body}")]
    Authentication {
        /// Human-readable name of the failed operation.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// HTTP request failed (DNS, TLS, timeout, etc).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] ureq::Error),

    /// Successful response whose body lacks an expected value.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
