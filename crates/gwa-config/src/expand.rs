//! `${VAR}` and `${VAR:-default}` expansion for credential fields.

use crate::ConfigError;

/// Expand environment variable references in a config value.
///
/// Values without a `${` sequence are returned unchanged, so a bare `$`
/// inside a secret never triggers a lookup.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, MissingVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| MissingVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

struct MissingVar(String);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_consumer_key() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("GWA_EXPAND_KEY", "consumer-123");
        }
        let result = expand_env("${GWA_EXPAND_KEY}", "garmin.consumer_key").unwrap();
        assert_eq!(result, "consumer-123");
        unsafe {
            std::env::remove_var("GWA_EXPAND_KEY");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("GWA_EXPAND_UNSET");
        }
        let result = expand_env("${GWA_EXPAND_UNSET:-regional}", "garmin.variant").unwrap();
        assert_eq!(result, "regional");
    }

    #[test]
    fn test_expand_embedded_in_url() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("GWA_EXPAND_HOST", "app.example.com");
        }
        let result =
            expand_env("https://${GWA_EXPAND_HOST}/garmin/callback", "garmin.callback_uri")
                .unwrap();
        assert_eq!(result, "https://app.example.com/garmin/callback");
        unsafe {
            std::env::remove_var("GWA_EXPAND_HOST");
        }
    }

    #[test]
    fn test_missing_var_names_field_and_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("GWA_EXPAND_MISSING");
        }
        let err = expand_env("${GWA_EXPAND_MISSING}", "garmin.access_secret").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("GWA_EXPAND_MISSING"));
        assert!(message.contains("garmin.access_secret"));
    }

    #[test]
    fn test_secret_with_bare_dollar_unchanged() {
        let result = expand_env("s3cr$t", "garmin.consumer_secret").unwrap();
        assert_eq!(result, "s3cr$t");
    }
}
