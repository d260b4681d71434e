//! `gwa auth generate-tokens` command implementation.

use std::io::{self, BufRead, Write};

use clap::Args;
use gwa_client::AuthorizationCallback;

use crate::commands::{GlobalArgs, build_client};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the auth generate-tokens command.
#[derive(Args)]
pub(crate) struct GenerateTokensArgs {
    /// Skip the redirect URL prompt and ask for token and verifier directly.
    #[arg(long)]
    manual: bool,
}

impl GenerateTokensArgs {
    /// Execute the generate-tokens command.
    ///
    /// # Errors
    ///
    /// Returns an error if any handshake step fails or the echoed token
    /// does not match the temporary credentials.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();

        let config = global.load_config()?;
        let client = build_client(&config)?;
        let handshake = client.handshake();

        output.step(
            1,
            &format!(
                "Requesting temporary credentials ({} variant)...",
                client.variant()
            ),
        );
        let temporary = handshake.request_temporary_credentials()?;
        output.success("Temporary credentials received");

        output.step(2, "Authorize the application. Open this URL in your browser:");
        output.link(&handshake.authorization_url(&temporary));

        let stdin = io::stdin();
        let callback = read_callback(&mut stdin.lock(), &mut io::stderr(), self.manual)?;

        output.step(3, "Exchanging for token credentials...");
        let token = handshake.exchange_for_token_credentials(
            &temporary,
            &callback.token,
            &callback.verifier,
        )?;

        output.success("OAuth authorization successful");
        output.info("Add these lines to the [garmin] section of gwa.toml:\n");
        output.credential("access_token", &token.identifier)?;
        output.credential("access_secret", &token.secret)?;

        Ok(())
    }
}

/// Read `oauth_token` and `oauth_verifier` from the user.
///
/// Unless `manual` is set, the redirect URL is requested first; an empty
/// answer falls back to asking for both values separately.
fn read_callback(
    input: &mut impl BufRead,
    prompt: &mut impl Write,
    manual: bool,
) -> Result<AuthorizationCallback, CliError> {
    if !manual {
        let url = ask(
            input,
            prompt,
            "Paste the URL you were redirected to (empty to enter values manually): ",
        )?;
        if !url.is_empty() {
            return Ok(AuthorizationCallback::from_url(&url)?);
        }
    }

    let token = ask(input, prompt, "Enter oauth_token: ")?;
    let verifier = ask(input, prompt, "Enter oauth_verifier: ")?;
    if token.is_empty() || verifier.is_empty() {
        return Err(CliError::Validation(
            "oauth_token and oauth_verifier are required".to_owned(),
        ));
    }
    Ok(AuthorizationCallback { token, verifier })
}

fn ask(input: &mut impl BufRead, prompt: &mut impl Write, question: &str) -> io::Result<String> {
    write!(prompt, "{question}")?;
    prompt.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_owned())
}
