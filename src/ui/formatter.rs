//! Pure formatting functions for UI output.
//!
//! Colored one-line messages printed by the binary. Styling goes through
//! `console`, which drops the colors when the stream is not a terminal.

use console::style;

use crate::domain::UpdatePolicy;
use crate::warning::UpdateWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal warning to the user.
pub fn display_warning(warning: &UpdateWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the outcome of a `--check` run.
///
/// # Arguments
/// * `local` - Tag the checkout is on, if it could be read
/// * `remote` - Latest upstream tag, if it could be read
/// * `due` - Whether the policy asks for an update
/// * `policy` - The policy that was applied
pub fn display_check_result(local: &str, remote: &str, due: bool, policy: &UpdatePolicy) {
    println!("\n{}", style("Update check:").bold());
    println!("  Local:  {}", style(or_unknown(local)).red());
    println!("  Latest: {}", style(or_unknown(remote)).green());
    println!("  Policy: {}", policy);
    if due {
        println!("  {}", style("An update is due.").yellow());
    } else {
        println!("  {}", style("Nothing to do.").dim());
    }
}

fn or_unknown(tag: &str) -> &str {
    if tag.is_empty() {
        "unknown"
    } else {
        tag
    }
}
