//! Installer configuration.
//!
//! Defaults cover a stock Laravel machine. A project can ship `.starter.json`
//! to route the external tools elsewhere (for example through
//! `docker compose exec`).
use crate::paths::ProjectPaths;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// External tool whose command line can be overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Composer,
    Npm,
    Php,
}

impl Tool {
    pub fn key(self) -> &'static str {
        match self {
            Tool::Composer => "composer",
            Tool::Npm => "npm",
            Tool::Php => "php",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StarterConfig {
    pub schema_version: u32,
    #[serde(default = "default_composer")]
    pub composer: String,
    #[serde(default = "default_npm")]
    pub npm: String,
    #[serde(default = "default_php")]
    pub php: String,
}

fn default_composer() -> String {
    "composer".to_string()
}

fn default_npm() -> String {
    "npm".to_string()
}

fn default_php() -> String {
    "php".to_string()
}

impl Default for StarterConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            composer: default_composer(),
            npm: default_npm(),
            php: default_php(),
        }
    }
}

impl StarterConfig {
    /// Raw command line configured for `tool`.
    pub fn command_line(&self, tool: Tool) -> &str {
        match tool {
            Tool::Composer => &self.composer,
            Tool::Npm => &self.npm,
            Tool::Php => &self.php,
        }
    }

    /// Split the configured command line into argv words.
    pub fn command(&self, tool: Tool) -> Result<Vec<String>> {
        let line = self.command_line(tool);
        let words = shell_words::split(line)
            .with_context(|| format!("parse {} command: {line}", tool.key()))?;
        if words.is_empty() {
            return Err(anyhow!("{} command is empty", tool.key()));
        }
        Ok(words)
    }
}

/// Load `.starter.json` from the project root, falling back to defaults.
pub fn load_config(paths: &ProjectPaths) -> Result<StarterConfig> {
    let path = paths.starter_config();
    if !path.is_file() {
        return Ok(StarterConfig::default());
    }
    let bytes = fs::read(&path).with_context(|| format!("read config {}", path.display()))?;
    let config: StarterConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse starter config {}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate schema version and tool command lines.
pub fn validate_config(config: &StarterConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported starter config schema_version {}",
            config.schema_version
        ));
    }
    for tool in [Tool::Composer, Tool::Npm, Tool::Php] {
        config.command(tool)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
