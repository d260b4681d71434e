//! Mock transport implementation for testing.
//!
//! Provides [`MockTransport`] for exercising the handshake and endpoints
//! without network access.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::GarminError;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Mock transport for testing.
///
/// Replays queued responses in order and records every request it receives.
///
/// # Example
///
/// ```ignore
/// use gwa_client::{HttpResponse, MockTransport};
///
/// let transport = MockTransport::new()
///     .with_response(HttpResponse::new(200, "oauth_token=T1&oauth_token_secret=TS1"));
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Create a mock with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next request.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_response(self, response: HttpResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Requests received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HttpTransport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, GarminError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GarminError::MalformedResponse("no mock response queued".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpMethod;

    fn request(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_owned(),
            authorization: "OAuth x".to_owned(),
            form: Vec::new(),
        }
    }

    #[test]
    fn test_replays_in_order_and_records() {
        let transport = MockTransport::new()
            .with_response(HttpResponse::new(200, "first"))
            .with_response(HttpResponse::new(404, "second"));

        assert_eq!(transport.send(&request("a")).unwrap().body, "first");
        assert_eq!(transport.send(&request("b")).unwrap().status, 404);
        assert_eq!(transport.call_count(), 2);
        assert_eq!(transport.requests()[1].url, "b");
    }

    #[test]
    fn test_empty_queue_is_error() {
        let transport = MockTransport::new();
        assert!(transport.send(&request("a")).is_err());
        assert_eq!(transport.call_count(), 1);
    }
}
