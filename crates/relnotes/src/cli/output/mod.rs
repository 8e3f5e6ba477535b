//! Terminal output helpers
//!
//! Status lines go to stderr so that notes printed to stdout can be piped.

use console::{style, Style};

/// Print a success line
pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

/// Print an error line
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print an informational line
pub fn info(message: &str) {
    eprintln!("{} {}", style("→").blue(), message);
}

/// Bold heading for listings
pub fn heading(text: &str) -> String {
    style(text).bold().to_string()
}

/// One preset row: name (padded), marker for the default, description
pub fn preset_row(name: &str, description: &str, is_default: bool) -> String {
    let marker = if is_default {
        style("*").green().to_string()
    } else {
        " ".to_string()
    };
    format!("  {} {:<20} {}", marker, style(name).cyan(), style(description).dim())
}

pub fn version_style() -> Style {
    Style::new().green().bold()
}

pub fn path_style() -> Style {
    Style::new().cyan()
}
