//! `gwa user-id` and `gwa deregister` command implementations.

use super::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Print the Garmin user ID to stdout.
pub(crate) fn user_id(global: &GlobalArgs) -> Result<(), CliError> {
    let (client, token) = global.connect()?;
    let user = client.user_id(&token)?;
    Output::new().result(&user.user_id)?;
    Ok(())
}

/// Deregister the user; the stored token stops working afterwards.
pub(crate) fn deregister(global: &GlobalArgs) -> Result<(), CliError> {
    let output = Output::new();
    let (client, token) = global.connect()?;

    client.deregister(&token)?;
    output.success("User registration deleted");
    output.warning("Remove access_token and access_secret from gwa.toml");
    Ok(())
}
