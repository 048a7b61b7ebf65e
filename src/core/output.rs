//! Unified output formatting utilities for consistent CLI presentation.
//!
//! Every line the switcher shows the user goes through these helpers so that
//! errors, warnings, progress steps and results look the same in every command.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, yellow for warnings, green for success,
//!   blue for progress steps
//! - **Compact progress**: Step lines carry no extra spacing so long sequences stay readable

use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a warning that does not stop the current operation
///
/// # Format
/// ```text
/// ⚠ Warning: <message>
/// ```
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠ Warning:".yellow(), message.white());
}

/// Formats and prints a success message
///
/// # Format
/// ```text
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message.white());
}

/// Formats and prints one step of a multi-step operation
pub fn print_step(message: &str) {
    println!("{} {}", "➤".blue(), message);
}

/// Formats and prints an informational message
pub fn print_info(message: &str) {
    println!("{}", message.white());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>:
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:", header.white());
}
