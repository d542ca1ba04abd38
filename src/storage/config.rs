//! Configuration handling for Dojo CLI
//!
//! Configuration is a TOML file, by default `config.toml` in the platform
//! config directory (`~/.config/dojo-cli/` on Linux). It is created with
//! defaults by [`Config::init`], which the command layer calls on startup.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::format::CodePrefixes;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

const DEFAULT_CONFIG: &str = r#"# Dojo CLI configuration

[main]
# Where problem files are saved, relative to the working directory
problems_dir = "problems"

# Open problems in the editor after saving them
open_saved_problems = false

# Description wrap width in characters, 0 disables wrapping
max_description_line_length = 88

# Keep topic tags in problem files
show_problem_tags = true

# Editor command for `open`, defaults to the platform opener
# editor = "code"

[providers.leetcode]
default_language = "Python"

# Text written before the solution code, by language name
[providers.leetcode.code_prefixes]
# Python = "from typing import List\n\n"
"#;

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainConfig {
    /// Root directory for problem files
    pub problems_dir: PathBuf,

    /// Open problems in the editor after saving
    pub open_saved_problems: bool,

    /// Description wrap width; zero or less disables wrapping
    pub max_description_line_length: i64,

    /// Keep topic tags when saving problems
    pub show_problem_tags: bool,

    /// Editor command used by `open`
    pub editor: Option<String>,
}

impl Default for MainConfig {
    fn default() -> Self {
        Self {
            problems_dir: PathBuf::from("problems"),
            open_saved_problems: false,
            max_description_line_length: 88,
            show_problem_tags: true,
            editor: None,
        }
    }
}

/// Settings for one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Language used when none is given on the command line
    pub default_language: String,

    /// Solution prefixes by language name
    pub code_prefixes: CodePrefixes,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default_language: "Python".to_string(),
            code_prefixes: CodePrefixes::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersConfig {
    pub leetcode: ProviderConfig,
}

/// Whole configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub main: MainConfig,
    pub providers: ProvidersConfig,
}

impl Config {
    /// Returns the default config file location
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("dev", "dojo", "dojo-cli")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Writes the default config file if none exists yet
    ///
    /// Returns true if a file was created.
    pub fn init(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        fs::write(path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        Ok(true)
    }

    /// Loads configuration, falling back to defaults if the file is missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Saves configuration
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }

    /// Returns the value at a dot-separated path, e.g. `main.problems_dir`
    pub fn get(&self, key: &str) -> Result<toml::Value, ConfigError> {
        let tree = self.to_value()?;
        lookup(&tree, key)
            .cloned()
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))
    }

    /// Sets the value at a dot-separated path from its command-line form
    ///
    /// `none`/`null` removes the key, which restores its default.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<(), ConfigError> {
        let value = parse_value(raw);
        let mut tree = self.to_value()?;

        let parts: Vec<&str> = key.split('.').collect();
        let (last, parents) = parts
            .split_last()
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;

        let mut table = tree
            .as_table_mut()
            .ok_or_else(|| ConfigError::Invalid("config root is not a table".to_string()))?;
        for part in parents {
            table = table
                .get_mut(*part)
                .and_then(toml::Value::as_table_mut)
                .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        }

        match &value {
            Some(value) => {
                table.insert(last.to_string(), value.clone());
            }
            None => {
                if table.remove(*last).is_none() && lookup(&Self::known_keys()?, key).is_none() {
                    return Err(ConfigError::NotFound(key.to_string()));
                }
            }
        }

        let updated: Config = tree
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Invalid(e.to_string()))?;

        // Unknown keys are dropped by deserialization
        if value.is_some() && updated.get(key).is_err() {
            return Err(ConfigError::NotFound(key.to_string()));
        }

        *self = updated;
        Ok(())
    }

    /// Every key a config file may hold, unset optional ones included
    fn known_keys() -> Result<toml::Value, ConfigError> {
        let mut config = Self::default();
        config.main.editor = Some(String::new());
        config.to_value()
    }

    fn to_value(&self) -> Result<toml::Value, ConfigError> {
        toml::Value::try_from(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

fn lookup<'v>(tree: &'v toml::Value, key: &str) -> Option<&'v toml::Value> {
    key.split('.').try_fold(tree, |value, part| value.get(part))
}

/// Interprets a command-line value: booleans, numbers, `none`, else a string
pub fn parse_value(raw: &str) -> Option<toml::Value> {
    match raw.to_lowercase().as_str() {
        "true" => return Some(toml::Value::Boolean(true)),
        "false" => return Some(toml::Value::Boolean(false)),
        "none" | "null" => return None,
        _ => {}
    }

    if let Ok(int) = raw.parse::<i64>() {
        return Some(toml::Value::Integer(int));
    }

    if let Ok(float) = raw.parse::<f64>() {
        if float.is_finite() {
            return Some(toml::Value::Float(float));
        }
    }

    Some(toml::Value::String(raw.to_string()))
}
