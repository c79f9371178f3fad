//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Inventory manager configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Load the sample parts and products at startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_sample_data: Option<bool>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// Ask before deleting entries or removing associated parts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_deletes: Option<bool>,
}

/// Keys accepted in config files, with a short description
pub const CONFIG_KEYS: &[(&str, &str)] = &[
    ("seed_sample_data", "Load sample parts and products at startup (true/false)"),
    ("default_format", "Default output format (auto, yaml, json, tsv, csv, md, id)"),
    ("confirm_deletes", "Ask before deleting entries (true/false)"),
];

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/invm/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Environment variables
        config.merge(Self::from_env(|key| std::env::var(key).ok()));

        config
    }

    /// Read a config file, ignoring missing or malformed files
    pub fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    /// Config built from `INVM_*` variables, looked up through `var`
    pub fn from_env(var: impl Fn(&str) -> Option<String>) -> Config {
        Config {
            seed_sample_data: var("INVM_SEED").and_then(|v| parse_bool(&v)),
            default_format: var("INVM_FORMAT").filter(|v| !v.trim().is_empty()),
            confirm_deletes: var("INVM_CONFIRM").and_then(|v| parse_bool(&v)),
        }
    }

    /// Get the path to the global config file
    ///
    /// `INVM_CONFIG_DIR` overrides the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var("INVM_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.yaml"));
        }
        directories::ProjectDirs::from("", "", "invm")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.seed_sample_data.is_some() {
            self.seed_sample_data = other.seed_sample_data;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.confirm_deletes.is_some() {
            self.confirm_deletes = other.confirm_deletes;
        }
    }

    pub fn seed_sample_data(&self) -> bool {
        self.seed_sample_data.unwrap_or(true)
    }

    pub fn confirm_deletes(&self) -> bool {
        self.confirm_deletes.unwrap_or(true)
    }

    /// Look up a key by name for `invm config show <key>`
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "seed_sample_data" => Some(self.seed_sample_data().to_string()),
            "default_format" => Some(
                self.default_format
                    .clone()
                    .unwrap_or_else(|| "auto".to_string()),
            ),
            "confirm_deletes" => Some(self.confirm_deletes().to_string()),
            _ => None,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
