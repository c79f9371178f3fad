//! `invm config` command - Configuration management
//!
//! Shows the effective configuration and edits the user config file.

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::CONFIG_KEYS;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a value in the user config file
    Set(SetArgs),

    /// Remove a value from the user config file
    Unset(UnsetArgs),

    /// Show the path to the user config file
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., default_format)
    pub key: String,

    /// Value to set
    pub value: String,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Set(args) => run_set(args, global),
        ConfigCommands::Unset(args) => run_unset(args, global),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        let value = config
            .get(key)
            .ok_or_else(|| miette::miette!("Unknown configuration key '{}'", key))?;
        println!("{}", value);
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in CONFIG_KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("  {}: {}", style(key).cyan(), style(value).yellow());
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (INVM_SEED, INVM_FORMAT, INVM_CONFIRM)");
    println!("  2. User config (config.yaml, see `invm config path`)");
    println!("  3. Built-in defaults");

    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    check_key(&args.key)?;
    check_value(&args.key, &args.value)?;
    let path = config_path()?;

    let mut map = read_mapping(&path)?;
    map.insert(
        serde_yml::Value::String(args.key.clone()),
        typed_value(&args.value),
    );

    // reject values the loader would ignore
    let yaml = serde_yml::to_string(&map).into_diagnostic()?;
    serde_yml::from_str::<Config>(&yaml)
        .map_err(|e| miette::miette!("Invalid value for '{}': {}", args.key, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    fs::write(&path, yaml).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Set {} {} {}",
            style("✓").green(),
            style(&args.key).cyan(),
            style("→").dim(),
            style(&args.value).yellow(),
        );
    }
    Ok(())
}

fn run_unset(args: UnsetArgs, global: &GlobalOpts) -> Result<()> {
    check_key(&args.key)?;
    let path = config_path()?;

    if !path.exists() {
        return Err(miette::miette!(
            "Config file does not exist: {}",
            path.display()
        ));
    }

    let mut map = read_mapping(&path)?;
    if map
        .remove(serde_yml::Value::String(args.key.clone()))
        .is_none()
    {
        return Err(miette::miette!("Key '{}' not found in config", args.key));
    }

    let yaml = serde_yml::to_string(&map).into_diagnostic()?;
    fs::write(&path, yaml).into_diagnostic()?;

    if !global.quiet {
        println!("{} Removed {}", style("✓").green(), style(&args.key).cyan());
    }
    Ok(())
}

fn run_path() -> Result<()> {
    let path = config_path()?;
    println!("{}", path.display());
    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in CONFIG_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'invm config set <key> <value>' to set a value.").dim()
    );

    Ok(())
}

fn config_path() -> Result<PathBuf> {
    Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine config directory"))
}

fn check_key(key: &str) -> Result<()> {
    if CONFIG_KEYS.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        Err(miette::miette!(
            help = "Run `invm config keys` to list valid keys",
            "Unknown configuration key '{}'",
            key
        ))
    }
}

/// Values the loader would parse but then ignore
fn check_value(key: &str, value: &str) -> Result<()> {
    if key == "default_format" && OutputFormat::from_str(value, true).is_err() {
        let names: Vec<String> = OutputFormat::value_variants()
            .iter()
            .filter_map(|f| f.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        return Err(miette::miette!(
            help = format!("Use one of: {}", names.join(", ")),
            "Invalid value for 'default_format': {}",
            value
        ));
    }
    Ok(())
}

fn read_mapping(path: &Path) -> Result<serde_yml::Mapping> {
    if !path.exists() {
        return Ok(serde_yml::Mapping::new());
    }
    let content = fs::read_to_string(path).into_diagnostic()?;
    match serde_yml::from_str::<serde_yml::Value>(&content).into_diagnostic()? {
        serde_yml::Value::Mapping(map) => Ok(map),
        serde_yml::Value::Null => Ok(serde_yml::Mapping::new()),
        _ => Err(miette::miette!(
            "Config file is not a mapping: {}",
            path.display()
        )),
    }
}

/// Store booleans as booleans so the file deserializes back into [`Config`]
fn typed_value(raw: &str) -> serde_yml::Value {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" => serde_yml::Value::Bool(true),
        "false" | "no" | "off" => serde_yml::Value::Bool(false),
        _ => serde_yml::Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_value() {
        assert_eq!(typed_value("Yes"), serde_yml::Value::Bool(true));
        assert_eq!(typed_value("off"), serde_yml::Value::Bool(false));
        assert_eq!(
            typed_value("json"),
            serde_yml::Value::String("json".to_string())
        );
    }

    #[test]
    fn test_check_value() {
        assert!(check_value("default_format", "JSON").is_ok());
        assert!(check_value("default_format", "xml").is_err());
        assert!(check_value("confirm_deletes", "xml").is_ok());
    }

    #[test]
    fn test_check_key() {
        assert!(check_key("default_format").is_ok());
        assert!(check_key("author").is_err());
    }

    #[test]
    fn test_read_mapping_missing_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        assert!(read_mapping(&path).unwrap().is_empty());

        fs::write(&path, "").unwrap();
        assert!(read_mapping(&path).unwrap().is_empty());

        fs::write(&path, "- a\n- b\n").unwrap();
        assert!(read_mapping(&path).is_err());
    }
}
