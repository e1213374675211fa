use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Display preferences from ~/.tickdash/config.toml. Everything has a
/// default; the file is optional.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    /// Width of the widest chart bar, in cells.
    pub chart_width: usize,
    /// Default cap on ticket rows printed by `list` and `dashboard`.
    pub row_limit: usize,
    /// Placeholder shown for tickets with no assignee name.
    pub missing_label: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            chart_width: 40,
            row_limit: 50,
            missing_label: "-".to_string(),
        }
    }
}

impl DisplayConfig {
    /// Load config from ~/.tickdash/config.toml. Returns defaults if the
    /// file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(DisplayConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: DisplayConfig =
            toml::from_str(&content).with_context(|| "Failed to parse config.toml")?;
        Ok(config)
    }
}

/// Path to the config file: ~/.tickdash/config.toml
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".tickdash").join("config.toml"))
}

/// Default config template content.
pub fn default_config_template() -> &'static str {
    r#"# ~/.tickdash/config.toml

# chart_width = 40
# row_limit = 50
# missing_label = "-"
"#
}

/// Create the default config file if it doesn't already exist.
pub fn init_config() -> Result<bool> {
    let path = config_path()?;
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, default_config_template())?;
    Ok(true)
}
