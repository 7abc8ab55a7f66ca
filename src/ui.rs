//! Terminal output helpers for the CLI

use console::style;

/// Format and print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}
