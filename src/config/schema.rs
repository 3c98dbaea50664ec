use crate::error::{Result, VqaError};
use crate::models::InitParams;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultParams,
    #[serde(default = "default_models")]
    pub models: Vec<ModelEntry>,
}

/// Parameters applied to every model unless its own entry overrides them
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DefaultParams {
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
}

/// One `[[models]]` registration
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ModelEntry {
    pub name: String,
    pub load_path: String,
    #[serde(default)]
    pub params: toml::Table,
}

// Default value functions
fn default_system_prompt() -> String {
    String::new()
}
fn default_cache_dir() -> String {
    dirs::cache_dir()
        .map(|dir| dir.join("vqa-hub"))
        .unwrap_or_else(|| PathBuf::from(".cache/vqa-hub"))
        .display()
        .to_string()
}
fn default_models() -> Vec<ModelEntry> {
    vec![
        ModelEntry {
            name: "echo".to_string(),
            load_path: "vqa_hub.backends:EchoModel".to_string(),
            params: toml::Table::new(),
        },
        ModelEntry {
            name: "canned".to_string(),
            load_path: "vqa_hub.backends:CannedModel".to_string(),
            params: toml::Table::new(),
        },
    ]
}

impl Default for DefaultParams {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            cache_dir: default_cache_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: DefaultParams::default(),
            models: default_models(),
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        tracing::info!(
            "Loaded config from {} ({} models)",
            path.display(),
            config.models.len()
        );
        Ok(config)
    }

    /// Parse config from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| VqaError::Config(format!("Failed to parse config: {e}")))
    }

    /// Find the entry registered under `name`; the last one wins
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&ModelEntry> {
        self.models.iter().rev().find(|m| m.name == name)
    }

    /// Init parameters for `name`: defaults overlaid with the entry's params
    ///
    /// `model_name` defaults to the registration name.
    pub fn init_params(&self, name: &str) -> Result<InitParams> {
        let mut params = InitParams::new();
        params.insert("model_name".to_string(), Value::from(name));
        params.insert(
            "system_prompt".to_string(),
            Value::from(self.defaults.system_prompt.as_str()),
        );
        params.insert(
            "cache_dir".to_string(),
            Value::from(self.defaults.cache_dir.as_str()),
        );

        if let Some(entry) = self.entry(name) {
            for (key, value) in &entry.params {
                let value = serde_json::to_value(value).map_err(|e| {
                    VqaError::Config(format!("Invalid value for '{name}.params.{key}': {e}"))
                })?;
                params.insert(key.clone(), value);
            }
        }

        Ok(params)
    }
}

/// Default config file path
///
/// `$XDG_CONFIG_HOME/vqa-hub/config.toml`, else the platform config directory.
pub fn config_path() -> Result<PathBuf> {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::config_dir()
            .ok_or_else(|| VqaError::Config("Cannot determine config directory".to_string()))?,
    };
    Ok(base.join("vqa-hub").join("config.toml"))
}
