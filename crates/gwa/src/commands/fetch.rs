//! `gwa fetch` command implementation.

use clap::{Args, ValueEnum};
use gwa_client::{GarminClient, HttpTransport, SummaryType, TokenCredentials};

use super::{GlobalArgs, validate_range};
use crate::error::CliError;
use crate::output::Output;

/// Summary types accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SummaryKind {
    Activities,
    Dailies,
    ManuallyUpdatedActivities,
    ActivityDetails,
}

impl From<SummaryKind> for SummaryType {
    fn from(kind: SummaryKind) -> Self {
        match kind {
            SummaryKind::Activities => Self::Activities,
            SummaryKind::Dailies => Self::Dailies,
            SummaryKind::ManuallyUpdatedActivities => Self::ManuallyUpdatedActivities,
            SummaryKind::ActivityDetails => Self::ActivityDetails,
        }
    }
}

/// Arguments for the fetch command.
#[derive(Args)]
pub(crate) struct FetchArgs {
    /// Summary type to fetch.
    #[arg(value_enum)]
    summary: SummaryKind,

    /// Start of the upload window (Unix seconds).
    #[arg(long)]
    start: u64,

    /// End of the upload window (Unix seconds).
    #[arg(long)]
    end: u64,
}

impl FetchArgs {
    /// Execute the fetch command, writing the JSON body to stdout.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        validate_range(self.start, self.end)?;
        let (client, token) = global.connect()?;
        let body = self.run(&client, &token)?;
        Output::new().result(&body)?;
        Ok(())
    }

    fn run<T: HttpTransport>(
        &self,
        client: &GarminClient<T>,
        token: &TokenCredentials,
    ) -> Result<String, CliError> {
        let start = self.start.to_string();
        let end = self.end.to_string();
        let body = client.summary(
            token,
            self.summary.into(),
            &[
                ("uploadStartTimeInSeconds", start.as_str()),
                ("uploadEndTimeInSeconds", end.as_str()),
            ],
        )?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use gwa_client::{
        ClientCredentials, EnvironmentProfile, GarminError, HttpResponse, MockTransport,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn client(response: HttpResponse) -> GarminClient<MockTransport> {
        GarminClient::with_transport(
            ClientCredentials::new("CK", "CS", "https://app/cb").unwrap(),
            EnvironmentProfile::default(),
            MockTransport::new().with_response(response),
        )
    }

    fn args(summary: SummaryKind) -> FetchArgs {
        FetchArgs {
            summary,
            start: 1_700_000_000,
            end: 1_700_086_400,
        }
    }

    #[test]
    fn test_fetch_returns_body() {
        let client = client(HttpResponse::new(200, r#"[{"summaryId":"s1"}]"#));
        let body = args(SummaryKind::ManuallyUpdatedActivities)
            .run(&client, &TokenCredentials::new("AT", "ATS"))
            .unwrap();

        assert_eq!(body, r#"[{"summaryId":"s1"}]"#);
        assert_eq!(
            client.transport().requests()[0].url,
            "https://healthapi.garmin.com/wellness-api/rest/manuallyUpdatedActivities\
             ?uploadStartTimeInSeconds=1700000000&uploadEndTimeInSeconds=1700086400"
        );
    }

    #[test]
    fn test_fetch_error_status() {
        let client = client(HttpResponse::new(400, "bad range"));

        let err = args(SummaryKind::Dailies)
            .run(&client, &TokenCredentials::new("AT", "ATS"))
            .unwrap_err();

        assert!(matches!(
            err,
            CliError::Garmin(GarminError::Authentication { status: 400, .. })
        ));
    }
}
