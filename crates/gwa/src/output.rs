//! Terminal output for the gwa CLI.
//!
//! Progress and diagnostics go to stderr in color. Command results and
//! generated `gwa.toml` lines go to stdout uncolored, so
//! `gwa auth generate-tokens >> gwa.toml` and `gwa fetch dailies ... | jq`
//! both work.

use std::io;

use console::{Style, Term};

pub(crate) struct Output {
    messages: Term,
    results: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            messages: Term::stderr(),
            results: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        let _ = self.messages.write_line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        let _ = self.messages.write_line(&self.green.apply_to(msg).to_string());
    }

    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.messages.write_line(&self.yellow.apply_to(msg).to_string());
    }

    pub(crate) fn error(&self, msg: &str) {
        let _ = self.messages.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Numbered handshake step, e.g. `Step 1: Requesting temporary credentials...`.
    pub(crate) fn step(&self, number: u8, msg: &str) {
        let label = self.cyan_bold.apply_to(format!("Step {number}:"));
        let _ = self.messages.write_line(&format!("\n{label} {msg}"));
    }

    /// URL the user has to open in a browser.
    pub(crate) fn link(&self, url: &str) {
        let _ = self
            .messages
            .write_line(&format!("\n{}\n", self.cyan_bold.apply_to(url)));
    }

    /// Write a command result to stdout.
    ///
    /// Unlike messages, a failed write (closed pipe) is reported.
    pub(crate) fn result(&self, text: &str) -> io::Result<()> {
        self.results.write_line(text)
    }

    /// Write a `key = "value"` line for the `[garmin]` section to stdout.
    pub(crate) fn credential(&self, key: &str, value: &str) -> io::Result<()> {
        self.results.write_line(&credential_line(key, value))
    }
}

/// TOML line for a credential, quoted and escaped by the `toml` serializer.
fn credential_line(key: &str, value: &str) -> String {
    format!("{key} = {}", toml::Value::String(value.to_owned()))
}
