//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! operations requiring user input must either have defaults or fail
//! with a clear error message.

use std::io::{self, BufRead, IsTerminal, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Whether stdin is attached to a terminal.
pub fn stdin_is_terminal() -> bool {
    io::stdin().is_terminal()
}

/// Prompt for confirmation (yes/no) on the terminal.
///
/// Returns `Ok(true)` if the user confirms, `Ok(false)` if they decline. An
/// empty answer takes `default`.
/// Returns `Err(PromptError::NotInteractive)` if not in interactive mode.
pub fn confirm(message: &str, default: bool, interactive: bool) -> Result<bool, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    let stdin = io::stdin();
    confirm_with(&mut stdin.lock(), &mut io::stderr(), message, default)
}

/// Confirmation prompt over arbitrary streams.
///
/// Accepts `y`/`yes` and `n`/`no` in any case; anything else re-asks. End of
/// input is `PromptError::Cancelled`.
pub fn confirm_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
    default: bool,
) -> Result<bool, PromptError> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    let io_err = |e: io::Error| PromptError::IoError(e.to_string());

    loop {
        write!(writer, "{} {} ", message, hint).map_err(io_err)?;
        writer.flush().map_err(io_err)?;

        let mut answer = String::new();
        if reader.read_line(&mut answer).map_err(io_err)? == 0 {
            return Err(PromptError::Cancelled);
        }

        match answer.trim().to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(writer, "Please answer y or n.").map_err(io_err)?,
        }
    }
}
