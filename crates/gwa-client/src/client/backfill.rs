//! Backfill requests for historic summaries.
//!
//! A backfill asks Garmin to re-deliver summaries for a past time range
//! through the regular push/ping channel; the response body carries no data.

use std::fmt;
use std::str::FromStr;

use tracing::info;

use super::GarminClient;
use crate::error::GarminError;
use crate::oauth::TokenCredentials;
use crate::transport::{HttpMethod, HttpTransport};

/// Summary types that can be backfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackfillType {
    Activities,
    Dailies,
    Epochs,
    ActivityDetails,
    Sleep,
    BodyComposition,
    StressDetails,
    UserMetrics,
    PulseOx,
    Respiration,
}

impl BackfillType {
    pub const ALL: [Self; 10] = [
        Self::Activities,
        Self::Dailies,
        Self::Epochs,
        Self::ActivityDetails,
        Self::Sleep,
        Self::BodyComposition,
        Self::StressDetails,
        Self::UserMetrics,
        Self::PulseOx,
        Self::Respiration,
    ];

    /// Path segment after `backfill/`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activities => "activities",
            Self::Dailies => "dailies",
            Self::Epochs => "epochs",
            Self::ActivityDetails => "activityDetails",
            Self::Sleep => "sleep",
            Self::BodyComposition => "bodyComps",
            Self::StressDetails => "stressDetails",
            Self::UserMetrics => "userMetrics",
            Self::PulseOx => "pulseOx",
            Self::Respiration => "respiration",
        }
    }
}

impl fmt::Display for BackfillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackfillType {
    type Err = GarminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                GarminError::InvalidConfiguration(format!("unknown backfill type '{s}'"))
            })
    }
}

impl<T: HttpTransport> GarminClient<T> {
    /// Request historic summaries of the given type.
    ///
    /// `params` are typically `summaryStartTimeInSeconds` and
    /// `summaryEndTimeInSeconds`.
    pub fn backfill(
        &self,
        token: &TokenCredentials,
        backfill_type: BackfillType,
        params: &[(&str, &str)],
    ) -> Result<(), GarminError> {
        info!("Requesting {} backfill", backfill_type);
        self.execute(
            HttpMethod::Get,
            &format!("backfill/{backfill_type}"),
            params,
            token,
            "backfill request",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{client_with, token};
    use crate::transport::HttpResponse;

    #[test]
    fn test_backfill_path() {
        let client = client_with(&[HttpResponse::new(202, "")]);

        client
            .backfill(
                &token(),
                BackfillType::BodyComposition,
                &[("summaryStartTimeInSeconds", "0"), ("summaryEndTimeInSeconds", "86400")],
            )
            .unwrap();

        let request = &client.transport().requests()[0];
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.url,
            "https://healthapi.garmin.com/wellness-api/rest/backfill/bodyComps\
             ?summaryStartTimeInSeconds=0&summaryEndTimeInSeconds=86400"
        );
    }

    #[test]
    fn test_backfill_conflict_is_error() {
        let client = client_with(&[HttpResponse::new(409, "duplicate backfill")]);
        let result = client.backfill(&token(), BackfillType::Sleep, &[]);

        assert!(matches!(
            result,
            Err(GarminError::Authentication { status: 409, .. })
        ));
    }

    #[test]
    fn test_backfill_type_round_trips_wire_names() {
        let names: Vec<&str> = BackfillType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "activities",
                "dailies",
                "epochs",
                "activityDetails",
                "sleep",
                "bodyComps",
                "stressDetails",
                "userMetrics",
                "pulseOx",
                "respiration"
            ]
        );
        assert_eq!("pulseOx".parse::<BackfillType>().unwrap(), BackfillType::PulseOx);
        assert!("bodyComposition".parse::<BackfillType>().is_err());
    }
}
