use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use mediamaster::store::indexer::ContactSeed;
use mediamaster::utils::log_debug;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Host API level the permission mapping is evaluated against
    #[serde(default = "default_api_level")]
    pub api_level: u32,
    #[serde(default = "default_package_name")]
    pub package_name: String,
    /// Directories or glob patterns indexed into the catalog
    #[serde(default)]
    pub library_paths: Vec<String>,
    #[serde(default)]
    pub contacts: Vec<ContactSeed>,
    #[serde(default)]
    pub vim_mode: bool,
    #[serde(default = "default_icon_mode")]
    pub icon_mode: String,
    #[serde(default = "default_true")]
    pub image_preview_enabled: bool,
    #[serde(default = "default_image_protocol")]
    pub image_protocol: String,
    #[serde(default)]
    pub data_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_level: default_api_level(),
            package_name: default_package_name(),
            library_paths: Vec::new(),
            contacts: Vec::new(),
            vim_mode: false,
            icon_mode: default_icon_mode(),
            image_preview_enabled: true,
            image_protocol: default_image_protocol(),
            data_dir: None,
        }
    }
}

fn default_api_level() -> u32 {
    34
}

fn default_package_name() -> String {
    "mediamaster".to_string()
}

fn default_icon_mode() -> String {
    "nerdfont".to_string()
}

fn default_true() -> bool {
    true
}

fn default_image_protocol() -> String {
    "auto".to_string()
}

/// Determine the config file path with fallback logic
///
/// An explicit path must exist. Otherwise `~/.config/mediamaster/config.yaml`
/// then `./config.yaml` are tried; `None` means run with defaults.
pub fn get_config_path(cli_path: Option<String>) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(Some(p));
        }
        anyhow::bail!("Config file not found at specified path: {}", path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("mediamaster").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}

/// Load the configuration, falling back to defaults when no file exists
pub fn load_config(cli_path: Option<String>) -> Result<Config> {
    let Some(path) = get_config_path(cli_path)? else {
        log_debug("No config file found, using defaults");
        return Ok(Config::default());
    };

    log_debug(&format!("Loading config from: {:?}", path));
    let config_str = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&config_str).with_context(|| format!("Invalid config file {}", path.display()))
}

fn parse_config(config_str: &str) -> Result<Config> {
    // An empty file deserializes to unit, not a mapping
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.api_level, 34);
        assert_eq!(config.package_name, "mediamaster");
        assert!(config.image_preview_enabled);
        assert!(config.library_paths.is_empty());
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
api_level: 30
package_name: com.example.media
library_paths:
  - ~/Pictures
  - /srv/music/*.mp3
contacts:
  - name: Ada Lovelace
    number: "555-0100"
  - number: "555-0199"
vim_mode: true
image_protocol: halfblocks
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.api_level, 30);
        assert_eq!(config.package_name, "com.example.media");
        assert_eq!(config.library_paths.len(), 2);
        assert_eq!(config.contacts.len(), 2);
        assert_eq!(config.contacts[1].name, None);
        assert!(config.vim_mode);
        assert_eq!(config.image_protocol, "halfblocks");
        assert_eq!(config.icon_mode, "nerdfont");
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        assert!(get_config_path(Some("/no/such/mediamaster.yaml".to_string())).is_err());
    }
}
