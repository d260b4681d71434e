//! User endpoints for the wellness API.

use serde::Deserialize;
use tracing::info;

use super::GarminClient;
use crate::error::GarminError;
use crate::oauth::TokenCredentials;
use crate::transport::{HttpMethod, HttpTransport};

/// Response of `GET user/id`; Garmin exposes no other user details.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserId {
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl<T: HttpTransport> GarminClient<T> {
    /// Get the Garmin user ID bound to the token.
    pub fn user_id(&self, token: &TokenCredentials) -> Result<UserId, GarminError> {
        let body = self.execute(HttpMethod::Get, "user/id", &[], token, "user id request")?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Deregister the user, revoking the token credentials.
    pub fn deregister(&self, token: &TokenCredentials) -> Result<(), GarminError> {
        info!("Deleting user registration");
        self.execute(
            HttpMethod::Delete,
            "user/registration",
            &[],
            token,
            "user deregistration",
        )?;
        Ok(())
    }
}
