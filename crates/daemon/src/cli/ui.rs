use std::fmt::Write as _;
use std::io::{self, IsTerminal};
use std::time::Duration;

use dialoguer::{Confirm, Input, Password};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use common::prelude::{score_password_strength, CipherMap};
use common::validation::WARNING_DISMISS_AFTER;
use sealnote_daemon::workflow::PrecautionsGate;

/// Lets scripts supply the note password without a prompt
pub const PASSWORD_ENV: &str = "SEALNOTE_PASSWORD";

const MAP_COLUMNS: usize = 6;

/// Interactive precautions gate. Defaults to "no".
pub struct ConfirmGate;

impl PrecautionsGate for ConfirmGate {
    fn acknowledge(&mut self, notice: &str) -> io::Result<bool> {
        eprintln!("{}\n", notice);
        Confirm::new()
            .with_prompt("I have read the precautions above")
            .default(false)
            .interact()
            .map_err(io::Error::other)
    }
}

pub fn confirm(prompt: &str) -> Result<bool, dialoguer::Error> {
    Confirm::new().with_prompt(prompt).default(false).interact()
}

pub fn input(prompt: &str) -> Result<String, dialoguer::Error> {
    Input::<String>::new().with_prompt(prompt).interact_text()
}

/// Read a password from `SEALNOTE_PASSWORD`, or prompt for it.
pub fn password(prompt: &str, confirm: bool) -> Result<String, dialoguer::Error> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }

    let mut dialog = Password::new().with_prompt(prompt);
    if confirm {
        dialog = dialog.with_confirmation("Repeat password", "Passwords do not match");
    }
    dialog.interact()
}

pub fn print_strength(password: &str) {
    eprintln!("Password strength: {}", score_password_strength(password));
}

/// Show `message` on stderr. On a terminal it is a spinner that clears itself
/// after [`WARNING_DISMISS_AFTER`].
pub async fn flash_warning(message: &str) {
    if !io::stderr().is_terminal() {
        eprintln!("warning: {}", message);
        return;
    }

    let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::with_template("{spinner:.yellow} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    tokio::time::sleep(WARNING_DISMISS_AFTER).await;
    spinner.finish_and_clear();
}

/// Lay the map out as a grid of `SYMBOL code` cells, in alphabet order.
pub fn render_cipher_map(map: &CipherMap) -> String {
    let rows: Vec<(char, &str)> = map.rows().collect();
    let mut out = String::new();
    for line in rows.chunks(MAP_COLUMNS) {
        let cells: Vec<String> = line
            .iter()
            .map(|(symbol, code)| format!("{} {:<4}", symbol, code))
            .collect();
        let _ = writeln!(out, "  {}", cells.join("   ").trim_end());
    }
    out
}
