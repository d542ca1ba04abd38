//! Config CLI command

use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use crate::storage::Config;

pub fn run(
    output: &Output,
    mut config: Config,
    path: &Path,
    key: &str,
    value: Option<&str>,
) -> Result<()> {
    match value {
        None => get(output, &config, key),
        Some(value) => {
            output.verbose_ctx("config", &format!("Setting {} = {:?}", key, value));
            config.set(key, value)?;
            config.save(path)?;

            if output.is_json() {
                output.data(&serde_json::json!({
                    "key": key,
                    "value": config.get(key).ok(),
                }));
            } else {
                output.success(&format!("Set {} = {}", key, value));
            }
            Ok(())
        }
    }
}

fn get(output: &Output, config: &Config, key: &str) -> Result<()> {
    let value = config.get(key)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "key": key,
            "value": value,
        }));
        return Ok(());
    }

    match &value {
        toml::Value::String(s) => println!("{}", s),
        toml::Value::Table(table) => {
            let text = toml::to_string_pretty(table).context("Failed to format config table")?;
            print!("{}", text);
        }
        other => println!("{}", other),
    }

    Ok(())
}
