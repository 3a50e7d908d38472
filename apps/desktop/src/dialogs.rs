//! Terminal implementations of the controller's blocking dialogs.

use std::io::{self, BufRead, Write};

use client_core::HostDialogs;
use tracing::info;

pub struct TerminalDialogs;

impl HostDialogs for TerminalDialogs {
    fn confirm(&self, message: &str) -> bool {
        match prompt(&format!("{message} [y/N] ")) {
            Ok(Some(answer)) => is_affirmative(&answer),
            _ => false,
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("! {message}");
    }
}

/// Answers every confirmation with yes (`--yes`); alerts pass through.
pub struct AutoConfirm<H>(pub H);

impl<H: HostDialogs> HostDialogs for AutoConfirm<H> {
    fn confirm(&self, message: &str) -> bool {
        info!(prompt = message, "confirmed by --yes");
        true
    }

    fn alert(&self, message: &str) {
        self.0.alert(message);
    }
}

/// Reads one trimmed line from stdin. `None` on end of input.
pub fn prompt(label: &str) -> io::Result<Option<String>> {
    let mut stderr = io::stderr();
    write!(stderr, "{label}")?;
    stderr.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
