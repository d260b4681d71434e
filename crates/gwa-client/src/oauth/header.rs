//! OAuth 1.0 `Authorization` header assembly.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngExt;
use tracing::debug;
use ureq::http::Uri;

use super::credentials::{ClientCredentials, Credentials};
use super::params::{ParameterSet, parse_pairs};
use super::signature::{SignatureMethod, SigningKey};
use crate::error::GarminError;

/// Generate cryptographically random nonce (32 hex characters).
fn generate_nonce() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}

/// Current UTC Unix timestamp in seconds.
fn generate_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Base string URI per RFC 5849 Section 3.4.1.2: lowercase scheme and host,
/// default port dropped, no query or fragment.
fn base_string_uri(uri: &Uri) -> Result<String, GarminError> {
    let scheme = uri.scheme_str().unwrap_or("https").to_ascii_lowercase();
    let host = uri
        .host()
        .ok_or_else(|| GarminError::InvalidConfiguration(format!("URI has no host: {uri}")))?
        .to_ascii_lowercase();

    let port = match (scheme.as_str(), uri.port_u16()) {
        (_, None) | ("http", Some(80)) | ("https", Some(443)) => String::new(),
        (_, Some(port)) => format!(":{port}"),
    };

    Ok(format!("{scheme}://{host}{port}{}", uri.path()))
}

/// Builds signed OAuth 1.0 `Authorization` header values for one consumer.
///
/// Holds no per-request state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct ProtocolHeaderBuilder {
    client: ClientCredentials,
    signature_method: SignatureMethod,
}

impl ProtocolHeaderBuilder {
    /// Create a builder signing with HMAC-SHA1.
    pub fn new(client: ClientCredentials) -> Self {
        Self {
            client,
            signature_method: SignatureMethod::default(),
        }
    }

    #[must_use]
    pub fn with_signature_method(mut self, signature_method: SignatureMethod) -> Self {
        self.signature_method = signature_method;
        self
    }

    pub fn client(&self) -> &ClientCredentials {
        &self.client
    }

    pub fn signature_method(&self) -> SignatureMethod {
        self.signature_method
    }

    /// Build the `Authorization` header value for a request.
    ///
    /// # Arguments
    /// * `method` - HTTP method actually used for the request
    /// * `uri` - Full request URI; its query parameters are signed but not
    ///   repeated in the header
    /// * `credentials` - Temporary or token credentials; `None` while
    ///   requesting temporary credentials
    /// * `params` - Body parameters, signed and included in the header
    pub fn build_header(
        &self,
        method: &str,
        uri: &str,
        credentials: Option<&dyn Credentials>,
        params: &ParameterSet,
    ) -> Result<String, GarminError> {
        self.build_header_with(
            method,
            uri,
            credentials,
            params,
            &generate_nonce(),
            generate_timestamp(),
        )
    }

    /// [`build_header`](Self::build_header) with a fixed nonce and timestamp.
    pub(crate) fn build_header_with(
        &self,
        method: &str,
        uri: &str,
        credentials: Option<&dyn Credentials>,
        params: &ParameterSet,
        nonce: &str,
        timestamp: u64,
    ) -> Result<String, GarminError> {
        let parsed: Uri = uri
            .parse()
            .map_err(|e| GarminError::InvalidConfiguration(format!("invalid URI {uri}: {e}")))?;
        let base_url = base_string_uri(&parsed)?;

        if let Some(credentials) = credentials
            && (credentials.identifier().is_empty() || credentials.secret().is_empty())
        {
            return Err(GarminError::InvalidConfiguration(
                "credentials require both identifier and secret".to_owned(),
            ));
        }

        let mut oauth_params = ParameterSet::new()
            .with("oauth_consumer_key", self.client.identifier())
            .with("oauth_nonce", nonce)
            .with("oauth_signature_method", self.signature_method.name())
            .with("oauth_timestamp", timestamp.to_string())
            .with("oauth_version", "1.0");
        if let Some(credentials) = credentials {
            oauth_params.insert("oauth_token", credentials.identifier());
        }
        oauth_params.extend(params.iter());

        // Signature params: header params + URI query params (RFC 5849 Section 3.4.1.3)
        let mut signature_params = oauth_params.clone();
        if let Some(query) = parsed.query() {
            signature_params.extend(parse_pairs(query));
        }

        let key = SigningKey::new(self.client.secret(), credentials.map(|c| c.secret()));
        let signature = self
            .signature_method
            .sign(method, &base_url, &signature_params, &key);
        debug!(method, base_url = %base_url, "Signed OAuth request");

        oauth_params.insert("oauth_signature", signature);
        Ok(format!("OAuth {}", oauth_params.to_header_params()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::oauth::credentials::TokenCredentials;

    fn builder(secret: &str) -> ProtocolHeaderBuilder {
        ProtocolHeaderBuilder::new(
            ClientCredentials::new("dpf43f3p2l4k3l03", secret, "https://app/cb").unwrap(),
        )
    }

    #[test]
    fn test_nonce_uniqueness() {
        let nonce1 = generate_nonce();
        let nonce2 = generate_nonce();
        assert_ne!(nonce1, nonce2);
        assert_eq!(nonce1.len(), 32);
    }

    #[test]
    fn test_nonce_unique_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| (0..250).map(|_| generate_nonce()).collect::<Vec<_>>()))
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for nonce in handle.join().unwrap() {
                assert!(seen.insert(nonce), "duplicate nonce");
            }
        }
        assert_eq!(seen.len(), 2000);
    }

    #[test]
    fn test_timestamp_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(generate_timestamp() > 1_577_836_800);
    }

    #[test]
    fn test_base_string_uri_normalization() {
        let uri: Uri = "https://Example.COM:443/Path/x?b=1".parse().unwrap();
        assert_eq!(base_string_uri(&uri).unwrap(), "https://example.com/Path/x");

        let uri: Uri = "http://example.com:8080/r".parse().unwrap();
        assert_eq!(base_string_uri(&uri).unwrap(), "http://example.com:8080/r");
    }

    #[test]
    fn test_known_answer_header() {
        let token = TokenCredentials::new("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00");
        let header = builder("kd94hf93k423kf44")
            .build_header_with(
                "GET",
                "http://photos.example.net/photos?file=vacation.jpg&size=original",
                Some(&token),
                &ParameterSet::new(),
                "kllo9940pd9333jh",
                1_191_242_096,
            )
            .unwrap();

        assert_eq!(
            header,
            "OAuth oauth_consumer_key=\"dpf43f3p2l4k3l03\", oauth_nonce=\"kllo9940pd9333jh\", \
             oauth_signature=\"tR3%2BTy81lMeYAr%2FFid0kMTYa%2FWM%3D\", \
             oauth_signature_method=\"HMAC-SHA1\", oauth_timestamp=\"1191242096\", \
             oauth_token=\"nnch734d00sl2jdk\", oauth_version=\"1.0\""
        );
    }

    #[test]
    fn test_fixed_inputs_are_deterministic() {
        let token = TokenCredentials::new("T", "TS");
        let b = builder("CS");
        let build = || {
            b.build_header_with(
                "GET",
                "https://healthapi.garmin.com/wellness-api/rest/dailies?a=1",
                Some(&token),
                &ParameterSet::new(),
                "nonce",
                1_700_000_000,
            )
            .unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_header_without_token() {
        let params = ParameterSet::new().with("oauth_callback", "https://app/cb");
        let header = builder("CS")
            .build_header("POST", "https://example.com/oauth/request_token", None, &params)
            .unwrap();

        assert!(header.starts_with("OAuth "));
        assert!(header.contains(r#"oauth_callback="https%3A%2F%2Fapp%2Fcb""#));
        assert!(header.contains(r#"oauth_signature_method="HMAC-SHA1""#));
        assert!(header.contains(r#"oauth_version="1.0""#));
        assert!(!header.contains("oauth_token="));
    }

    #[test]
    fn test_header_with_verifier() {
        let token = TokenCredentials::new("request_token", "request_secret");
        let params = ParameterSet::new().with("oauth_verifier", "verifier_code");
        let header = builder("CS")
            .build_header("POST", "https://example.com/oauth/access_token", Some(&token), &params)
            .unwrap();

        assert!(header.contains(r#"oauth_token="request_token""#));
        assert!(header.contains(r#"oauth_verifier="verifier_code""#));
        assert!(!header.contains("oauth_callback"));
    }

    #[test]
    fn test_query_params_signed_but_not_in_header() {
        let token = TokenCredentials::new("T", "TS");
        let b = builder("CS");
        let sign = |uri: &str| {
            b.build_header_with("GET", uri, Some(&token), &ParameterSet::new(), "n", 1)
                .unwrap()
        };

        let with_query = sign("https://example.com/rest/dailies?uploadStartTimeInSeconds=1");
        let other_query = sign("https://example.com/rest/dailies?uploadStartTimeInSeconds=2");

        assert!(!with_query.contains("uploadStartTimeInSeconds"));
        assert_ne!(with_query, other_query);
    }

    #[test]
    fn test_encoded_query_is_decoded_before_signing() {
        let token = TokenCredentials::new("T", "TS");
        let b = builder("CS");
        let signature = |uri: &str, params: &ParameterSet| {
            let header = b
                .build_header_with("GET", uri, Some(&token), params, "n", 1)
                .unwrap();
            header
                .split(", ")
                .find(|p| p.starts_with("oauth_signature="))
                .map(str::to_owned)
        };

        // Same signature as if "a b" had been signed as a parameter directly.
        let from_uri = signature("https://example.com/r?q=a%20b", &ParameterSet::new());
        let direct = signature("https://example.com/r", &ParameterSet::new().with("q", "a b"));
        assert!(from_uri.is_some());
        assert_eq!(from_uri, direct);
    }

    #[test]
    fn test_empty_token_secret_rejected() {
        let token = TokenCredentials::new("T", "");
        let result = builder("CS").build_header(
            "GET",
            "https://example.com/r",
            Some(&token),
            &ParameterSet::new(),
        );
        assert!(matches!(result, Err(GarminError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_invalid_uri_rejected() {
        let result = builder("CS").build_header("GET", "not a uri", None, &ParameterSet::new());
        assert!(matches!(result, Err(GarminError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_builder_shared_between_threads() {
        let b = Arc::new(builder("CS"));
        let token = TokenCredentials::new("T", "TS");

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let b = Arc::clone(&b);
                let token = token.clone();
                thread::spawn(move || {
                    let params = ParameterSet::new();
                    b.build_header("GET", "https://example.com/r", Some(&token), &params)
                        .unwrap()
                })
            })
            .collect();

        let headers: HashSet<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(headers.len(), 4);
    }

    #[test]
    fn test_plaintext_header() {
        let client = ClientCredentials::new("CK", "CS", "https://app/cb").unwrap();
        let builder =
            ProtocolHeaderBuilder::new(client).with_signature_method(SignatureMethod::Plaintext);
        let token = TokenCredentials::new("T", "TS");

        let header = builder
            .build_header_with(
                "GET",
                "https://healthapi.garmin.com/wellness-api/rest/dailies",
                Some(&token),
                &ParameterSet::new(),
                "n",
                1,
            )
            .unwrap();

        assert_eq!(builder.signature_method(), SignatureMethod::Plaintext);
        assert!(header.contains(r#"oauth_signature_method="PLAINTEXT""#));
        assert!(header.contains(r#"oauth_signature="CS%26TS""#));
    }
}
