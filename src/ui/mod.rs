//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Colored one-line messages for the binary
//! - This module - The operator console used by the update workflow

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::error::{GitupError, Result};
use crate::warning::UpdateWarning;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_check_result, display_error, display_status, display_success, display_warning,
};

/// Line-oriented operator console
///
/// Reads answers from `input` and writes prompts and warnings to `output`.
/// Any `BufRead`/`Write` pair works, which keeps the workflow testable with
/// byte slices and vectors.
pub struct Console<I, O> {
    input: I,
    output: O,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process stdin and stdout
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Console { input, output }
    }

    /// Everything written so far
    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Tell the operator an update is available and ask whether to take it
    pub fn prompt_update(&mut self, local: &str, remote: &str) -> Result<()> {
        writeln!(
            self.output,
            "You are currently on '{}', a new version is available.",
            local
        )?;
        writeln!(self.output, "Do you want to update and move on '{}'?", remote)?;
        self.output.flush()?;
        Ok(())
    }

    /// Print a non-fatal warning
    pub fn warn(&mut self, warning: &UpdateWarning) -> Result<()> {
        writeln!(self.output, "{}", warning)?;
        self.output.flush()?;
        Ok(())
    }

    /// Block until the operator answers yes or no
    ///
    /// Unrecognized lines, including ones that are not valid UTF-8, are
    /// reported and skipped. Exhausted or unreadable input counts as "no".
    pub fn read_confirmation(&mut self) -> bool {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.input.read_until(b'\n', &mut buf) {
                Ok(0) | Err(_) => return false,
                Ok(_) => {}
            }
            // Invalid bytes become U+FFFD and can never match an answer.
            let line = String::from_utf8_lossy(&buf);
            let answer = strip_line_ending(&line);
            match parse_confirmation(answer) {
                Ok(confirmed) => return confirmed,
                Err(e) => {
                    tracing::debug!(answer, "unrecognized confirmation");
                    let warning = UpdateWarning::UnrecognizedResponse {
                        reason: e.to_string(),
                    };
                    // The loop keeps reading even if the warning cannot be shown.
                    let _ = self.warn(&warning);
                }
            }
        }
    }
}

/// Map an answer to a boolean
///
/// Accepts y, Y, yes, Yes, YES and n, N, no, No, NO exactly; surrounding
/// whitespace makes an answer invalid.
pub fn parse_confirmation(answer: &str) -> Result<bool> {
    match answer {
        "y" | "Y" | "yes" | "Yes" | "YES" => Ok(true),
        "n" | "N" | "no" | "No" | "NO" => Ok(false),
        other => Err(GitupError::UnrecognizedConfirmation(other.to_string())),
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_parse_confirmation_accepts_exact_tokens() {
        for answer in ["y", "Y", "yes", "Yes", "YES"] {
            assert!(parse_confirmation(answer).unwrap(), "{}", answer);
        }
        for answer in ["n", "N", "no", "No", "NO"] {
            assert!(!parse_confirmation(answer).unwrap(), "{}", answer);
        }
    }

    #[test]
    fn test_parse_confirmation_rejects_padding_and_mixed_case() {
        for answer in [" yes", "n ", "yEs", "", "ok"] {
            assert!(matches!(
                parse_confirmation(answer),
                Err(GitupError::UnrecognizedConfirmation(_))
            ));
        }
    }

    #[test]
    fn test_read_confirmation_yes() {
        assert!(console("y\n").read_confirmation());
        assert!(console("YES").read_confirmation());
    }

    #[test]
    fn test_read_confirmation_no() {
        assert!(!console("n\n").read_confirmation());
    }

    #[test]
    fn test_read_confirmation_skips_invalid_lines() {
        let mut console = console("maybe\n yes\nYes\n");
        assert!(console.read_confirmation());

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output.matches("only accepts yes or no").count(), 2);
    }

    #[test]
    fn test_read_confirmation_skips_non_utf8_lines() {
        let mut console = Console::new(&b"\xff\xfe\ny\n"[..], Vec::new());
        assert!(console.read_confirmation());

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output.matches("only accepts yes or no").count(), 1);
    }

    #[test]
    fn test_read_confirmation_handles_crlf() {
        assert!(console("yes\r\n").read_confirmation());
    }

    #[test]
    fn test_read_confirmation_exhausted_input_is_no() {
        assert!(!console("").read_confirmation());
        assert!(!console("what\n").read_confirmation());
    }

    #[test]
    fn test_prompt_update_names_both_tags() {
        let mut console = console("");
        console.prompt_update("v1.0.0", "v2.0.0").unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("'v1.0.0'"));
        assert!(output.contains("'v2.0.0'"));
    }
}
