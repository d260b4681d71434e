//! OAuth 1.0 parameter encoding and normalization (RFC 5849 Section 3.4.1.3).

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode};

/// OAuth unreserved characters: A-Z a-z 0-9 - . _ ~
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode string per RFC 3986.
///
/// Space becomes `%20`, never `+`.
pub fn oauth_encode(input: &str) -> String {
    percent_encode(input.as_bytes(), OAUTH_ENCODE_SET).to_string()
}

/// Decode a percent-encoded string, leaving `+` untouched.
pub(crate) fn oauth_decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

/// Parse `key=value&key=value` pairs, percent-decoding both sides.
///
/// Used for URI query strings and form-encoded response bodies.
pub(crate) fn parse_pairs(input: &str) -> Vec<(String, String)> {
    input
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (oauth_decode(key), oauth_decode(value))
        })
        .collect()
}

/// Protocol and request parameters taking part in one signature.
///
/// Duplicate keys are kept; both serializations order entries by encoded
/// key, then by encoded value, so insertion order never matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    params: Vec<(String, String)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter (raw, unencoded).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.push((key.into(), value.into()));
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encoded pairs sorted byte-wise by key, then value.
    fn normalized(&self) -> Vec<(String, String)> {
        let mut encoded: Vec<(String, String)> = self
            .params
            .iter()
            .map(|(k, v)| (oauth_encode(k), oauth_encode(v)))
            .collect();
        encoded.sort();
        encoded
    }

    /// Serialize as `key=value` pairs joined with `&` (signature base string form).
    pub fn to_base_string_params(&self) -> String {
        self.normalized()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Serialize as `key="value"` pairs joined with `, ` (Authorization header form).
    pub fn to_header_params(&self) -> String {
        self.normalized()
            .iter()
            .map(|(k, v)| format!("{k}=\"{v}\""))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ParameterSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oauth_encode_unreserved() {
        assert_eq!(oauth_encode("abc123"), "abc123");
        assert_eq!(oauth_encode("ABC"), "ABC");
        assert_eq!(oauth_encode("-._~"), "-._~");
    }

    #[test]
    fn test_oauth_encode_reserved() {
        assert_eq!(oauth_encode(" "), "%20");
        assert_eq!(oauth_encode("&"), "%26");
        assert_eq!(oauth_encode("="), "%3D");
        assert_eq!(oauth_encode("/"), "%2F");
        assert_eq!(oauth_encode("a b+c"), "a%20b%2Bc");
    }

    #[test]
    fn test_oauth_encode_non_ascii() {
        assert_eq!(oauth_encode("é"), "%C3%A9");
    }

    #[test]
    fn test_oauth_decode_keeps_plus() {
        assert_eq!(oauth_decode("a%20b+c"), "a b+c");
    }

    #[test]
    fn test_parse_pairs() {
        let pairs = parse_pairs("oauth_token=abc%2B123&flag&empty=&oauth_token_secret=xyz%3D789");
        assert_eq!(
            pairs,
            vec![
                ("oauth_token".to_owned(), "abc+123".to_owned()),
                ("flag".to_owned(), String::new()),
                ("empty".to_owned(), String::new()),
                ("oauth_token_secret".to_owned(), "xyz=789".to_owned()),
            ]
        );
    }

    #[test]
    fn test_normalization_is_order_independent() {
        let forward: ParameterSet = [("b", "2"), ("a", "1"), ("c", "x y"), ("a", "0")]
            .into_iter()
            .collect();
        let reverse: ParameterSet = [("a", "0"), ("c", "x y"), ("a", "1"), ("b", "2")]
            .into_iter()
            .collect();

        assert_eq!(
            forward.to_base_string_params(),
            reverse.to_base_string_params()
        );
        assert_eq!(forward.to_header_params(), reverse.to_header_params());
    }

    #[test]
    fn test_duplicate_keys_ordered_by_value() {
        let params = ParameterSet::new().with("a", "z").with("a", "b");
        assert_eq!(params.to_base_string_params(), "a=b&a=z");
    }

    #[test]
    fn test_sort_uses_encoded_form() {
        // "%" (0x25) sorts before "a", so the encoded space comes first.
        let params = ParameterSet::new().with("k", "a").with("k", " ");
        assert_eq!(params.to_base_string_params(), "k=%20&k=a");
    }

    #[test]
    fn test_header_form() {
        let params = ParameterSet::new()
            .with("oauth_nonce", "n")
            .with("oauth_callback", "https://app/cb");
        assert_eq!(
            params.to_header_params(),
            r#"oauth_callback="https%3A%2F%2Fapp%2Fcb", oauth_nonce="n""#
        );
    }

    #[test]
    fn test_get_returns_first_value() {
        let params = ParameterSet::new().with("a", "1").with("a", "2");
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.get("b"), None);
        assert_eq!(params.len(), 2);
    }
}
