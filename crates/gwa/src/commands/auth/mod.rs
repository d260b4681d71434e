//! `gwa auth` subcommand group.

mod generate_tokens;

use clap::Subcommand;

use generate_tokens::GenerateTokensArgs;

use super::GlobalArgs;
use crate::error::CliError;

/// OAuth authorization commands.
#[derive(Subcommand)]
pub(crate) enum AuthCommand {
    /// Authorize the application and print token credentials for gwa.toml.
    GenerateTokens(GenerateTokensArgs),
}

impl AuthCommand {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        match self {
            Self::GenerateTokens(args) => args.execute(global),
        }
    }
}
