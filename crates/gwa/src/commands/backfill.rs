//! `gwa backfill` command implementation.

use clap::{Args, ValueEnum};
use gwa_client::{BackfillType, GarminClient, HttpTransport, TokenCredentials};

use super::{GlobalArgs, validate_range};
use crate::error::CliError;
use crate::output::Output;

/// Backfill types accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BackfillKind {
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

impl From<BackfillKind> for BackfillType {
    fn from(kind: BackfillKind) -> Self {
        match kind {
            BackfillKind::Activities => Self::Activities,
            BackfillKind::Dailies => Self::Dailies,
            BackfillKind::Epochs => Self::Epochs,
            BackfillKind::ActivityDetails => Self::ActivityDetails,
            BackfillKind::Sleep => Self::Sleep,
            BackfillKind::BodyComposition => Self::BodyComposition,
            BackfillKind::StressDetails => Self::StressDetails,
            BackfillKind::UserMetrics => Self::UserMetrics,
            BackfillKind::PulseOx => Self::PulseOx,
            BackfillKind::Respiration => Self::Respiration,
        }
    }
}

/// Arguments for the backfill command.
#[derive(Args)]
pub(crate) struct BackfillArgs {
    /// Summary type to backfill.
    #[arg(value_enum)]
    summary: BackfillKind,

    /// Start of the summary window (Unix seconds).
    #[arg(long)]
    start: u64,

    /// End of the summary window (Unix seconds).
    #[arg(long)]
    end: u64,
}

impl BackfillArgs {
    /// Execute the backfill command.
    ///
    /// Garmin answers with no data; summaries arrive later through the
    /// configured push or ping endpoint.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        validate_range(self.start, self.end)?;
        let (client, token) = global.connect()?;

        let backfill_type = self.run(&client, &token)?;
        output.success(&format!(
            "Backfill of {backfill_type} accepted for {}..{}",
            self.start, self.end
        ));
        Ok(())
    }

    fn run<T: HttpTransport>(
        &self,
        client: &GarminClient<T>,
        token: &TokenCredentials,
    ) -> Result<BackfillType, CliError> {
        let backfill_type = BackfillType::from(self.summary);
        let start = self.start.to_string();
        let end = self.end.to_string();
        client.backfill(
            token,
            backfill_type,
            &[
                ("summaryStartTimeInSeconds", start.as_str()),
                ("summaryEndTimeInSeconds", end.as_str()),
            ],
        )?;
        Ok(backfill_type)
    }
}
