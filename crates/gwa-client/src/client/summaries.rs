//! Summary endpoints for the wellness API.

use std::fmt;
use std::str::FromStr;

use tracing::info;

use super::GarminClient;
use crate::error::GarminError;
use crate::oauth::TokenCredentials;
use crate::transport::{HttpMethod, HttpTransport};

/// Summary types that can be pulled directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryType {
    Activities,
    Dailies,
    ManuallyUpdatedActivities,
    ActivityDetails,
}

impl SummaryType {
    /// Endpoint path relative to the wellness API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Activities => "activities",
            Self::Dailies => "dailies",
            Self::ManuallyUpdatedActivities => "manuallyUpdatedActivities",
            Self::ActivityDetails => "activityDetails",
        }
    }

    fn operation(self) -> &'static str {
        match self {
            Self::Activities => "activity summary request",
            Self::Dailies => "daily summary request",
            Self::ManuallyUpdatedActivities => "manually updated activity summary request",
            Self::ActivityDetails => "activity details summary request",
        }
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for SummaryType {
    type Err = GarminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::Activities,
            Self::Dailies,
            Self::ManuallyUpdatedActivities,
            Self::ActivityDetails,
        ]
        .into_iter()
        .find(|t| t.path() == s)
        .ok_or_else(|| GarminError::InvalidConfiguration(format!("unknown summary type '{s}'")))
    }
}

impl<T: HttpTransport> GarminClient<T> {
    /// Fetch a summary, returning the raw JSON body.
    ///
    /// `params` are sent as query parameters, e.g.
    /// `uploadStartTimeInSeconds` / `uploadEndTimeInSeconds`.
    pub fn summary(
        &self,
        token: &TokenCredentials,
        summary: SummaryType,
        params: &[(&str, &str)],
    ) -> Result<String, GarminError> {
        info!("Getting {} summary", summary);
        self.execute(
            HttpMethod::Get,
            summary.path(),
            params,
            token,
            summary.operation(),
        )
    }

    /// Activity summaries (`/activities`).
    pub fn activity_summary(
        &self,
        token: &TokenCredentials,
        params: &[(&str, &str)],
    ) -> Result<String, GarminError> {
        self.summary(token, SummaryType::Activities, params)
    }

    /// Daily summaries (`/dailies`).
    pub fn daily_summary(
        &self,
        token: &TokenCredentials,
        params: &[(&str, &str)],
    ) -> Result<String, GarminError> {
        self.summary(token, SummaryType::Dailies, params)
    }

    /// Manually updated activity summaries (`/manuallyUpdatedActivities`).
    pub fn manually_updated_activity_summary(
        &self,
        token: &TokenCredentials,
        params: &[(&str, &str)],
    ) -> Result<String, GarminError> {
        self.summary(token, SummaryType::ManuallyUpdatedActivities, params)
    }

    /// Activity details summaries (`/activityDetails`).
    pub fn activity_details_summary(
        &self,
        token: &TokenCredentials,
        params: &[(&str, &str)],
    ) -> Result<String, GarminError> {
        self.summary(token, SummaryType::ActivityDetails, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{client_with, token};
    use crate::transport::HttpResponse;

    const RANGE: [(&str, &str); 2] = [
        ("uploadStartTimeInSeconds", "1700000000"),
        ("uploadEndTimeInSeconds", "1700086400"),
    ];

    #[test]
    fn test_daily_summary_returns_raw_body() {
        let client = client_with(&[HttpResponse::new(200, r#"[{"summaryId":"x"}]"#)]);

        let body = client.daily_summary(&token(), &RANGE).unwrap();
        assert_eq!(body, r#"[{"summaryId":"x"}]"#);

        let request = &client.transport().requests()[0];
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.url,
            "https://healthapi.garmin.com/wellness-api/rest/dailies\
             ?uploadStartTimeInSeconds=1700000000&uploadEndTimeInSeconds=1700086400"
        );
        assert!(request.authorization.contains(r#"oauth_token="AT""#));
        assert!(!request.authorization.contains("uploadStartTimeInSeconds"));
    }

    #[test]
    fn test_each_summary_hits_its_endpoint() {
        let ok = || HttpResponse::new(200, "[]");
        let client = client_with(&[ok(), ok(), ok(), ok()]);
        let token = token();

        client.activity_summary(&token, &RANGE).unwrap();
        client.daily_summary(&token, &RANGE).unwrap();
        client.manually_updated_activity_summary(&token, &RANGE).unwrap();
        client.activity_details_summary(&token, &RANGE).unwrap();

        let paths: Vec<String> = client
            .transport()
            .requests()
            .iter()
            .map(|r| {
                r.url
                    .trim_start_matches(client.profile().user_api_url())
                    .split('?')
                    .next()
                    .unwrap_or_default()
                    .to_owned()
            })
            .collect();
        assert_eq!(
            paths,
            vec![
                "activities",
                "dailies",
                "manuallyUpdatedActivities",
                "activityDetails"
            ]
        );
    }

    #[test]
    fn test_summary_error_carries_status_and_body() {
        let client = client_with(&[HttpResponse::new(401, "unauthorized")]);
        let err = client.activity_summary(&token(), &RANGE).unwrap_err();

        match err {
            GarminError::Authentication {
                operation,
                status,
                body,
            } => {
                assert_eq!(operation, "activity summary request");
                assert_eq!(status, 401);
                assert_eq!(body, "unauthorized");
            }
            other => panic!("expected Authentication, got {other:?}"),
        }
    }

    #[test]
    fn test_summary_type_from_str() {
        assert_eq!(
            "manuallyUpdatedActivities".parse::<SummaryType>().unwrap(),
            SummaryType::ManuallyUpdatedActivities
        );
        assert!("sleeps".parse::<SummaryType>().is_err());
    }
}
