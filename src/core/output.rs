//! Consistent CLI message styling.
//!
//! Errors go to stderr in red, success and info messages to stdout. Snapshot
//! rows are formatted by [`crate::core::render`].

use colored::*;

/// `✕ Error: <message>` on stderr
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// `✓ <message>`
pub fn print_success(message: &str) {
    println!("\n{} {}\n", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// `<header>:` followed by a blank line
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}
