//! Terminal I/O utilities for CLI.
//!
//! Provides TTY detection, user prompting, and the interactive
//! confirmation used to gate synchronization edits.

use std::io::{self, BufRead, IsTerminal, Write};

use propsync::sync::Confirm;

pub fn is_stdin_tty() -> bool {
    io::stdin().is_terminal()
}

pub fn prompt(message: &str) -> propsync::Result<String> {
    eprint!("{}", message);
    io::stderr().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line).map_err(|e| {
        propsync::Error::internal_io(
            format!("Failed to read input: {}", e),
            Some("read stdin".to_string()),
        )
    })?;

    Ok(line.trim().to_string())
}

/// Interactive yes/no confirmation on the terminal. Anything other
/// than `y`/`yes` (case-insensitive) declines.
pub struct TtyConfirm;

impl Confirm for TtyConfirm {
    fn confirm(&self, message: &str, accept_label: &str, cancel_label: &str) -> propsync::Result<bool> {
        let answer = prompt(&format!(
            "{}\n  [y] {}  [n] {} > ",
            message, accept_label, cancel_label
        ))?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }
}
