//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use clap::ValueEnum;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Inventory};

/// Build the inventory a command works on: seeded unless `--empty` or config says otherwise
pub fn open_inventory(global: &GlobalOpts, config: &Config) -> Inventory {
    if global.empty || !config.seed_sample_data() {
        Inventory::new()
    } else {
        Inventory::with_sample_data()
    }
}

/// Resolve `--format auto` against the configured default format
pub fn resolve_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    if global.format != OutputFormat::Auto {
        return global.format;
    }
    config
        .default_format
        .as_deref()
        .and_then(|f| OutputFormat::from_str(f, true).ok())
        .unwrap_or(OutputFormat::Auto)
}

/// Ask a yes/no question, defaulting to no.
///
/// Uses a dialoguer prompt on a terminal and a plain `[y/N]` line otherwise.
pub fn confirm(prompt: &str) -> Result<bool> {
    if console::user_attended() {
        return Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .into_diagnostic();
    }

    print!("{} [y/N] ", prompt);
    std::io::Write::flush(&mut std::io::stdout()).into_diagnostic()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input).into_diagnostic()?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Print a success line unless quiet
pub fn print_success(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        println!("{} {}", style("✓").green(), message);
    }
}

/// Format a price with two decimals
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(format: OutputFormat, empty: bool) -> GlobalOpts {
        GlobalOpts {
            format,
            quiet: false,
            verbose: false,
            empty,
        }
    }

    #[test]
    fn test_open_inventory() {
        let config = Config::default();
        assert_eq!(open_inventory(&global(OutputFormat::Auto, false), &config).all_parts().len(), 3);
        assert!(open_inventory(&global(OutputFormat::Auto, true), &config)
            .all_parts()
            .is_empty());

        let no_seed = Config {
            seed_sample_data: Some(false),
            ..Default::default()
        };
        assert!(open_inventory(&global(OutputFormat::Auto, false), &no_seed)
            .all_products()
            .is_empty());
    }

    #[test]
    fn test_resolve_format() {
        let config = Config {
            default_format: Some("JSON".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_format(&global(OutputFormat::Auto, false), &config), OutputFormat::Json);
        assert_eq!(resolve_format(&global(OutputFormat::Csv, false), &config), OutputFormat::Csv);

        let bogus = Config {
            default_format: Some("xml".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_format(&global(OutputFormat::Auto, false), &bogus), OutputFormat::Auto);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(15.0), "15.00");
        assert_eq!(format_price(299.999), "300.00");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv("with\nnewline"), "\"with\nnewline\"");
    }
}
