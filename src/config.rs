use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// API prefix, e.g. `http://localhost:5000/api`
    pub base_url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    #[serde(default)]
    pub vim_mode: bool,
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(text).context("Invalid config file")?;
        if config.base_url.trim().is_empty() {
            anyhow::bail!("Config field base_url must not be empty");
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
    }

    /// Credentials for session login, only when both are set
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() => Some((user, pass)),
            _ => None,
        }
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(crate::utils::default_download_dir)
    }
}

/// Determine the config file path with fallback logic
pub fn get_config_path(cli_path: Option<String>) -> Result<PathBuf> {
    // If CLI argument provided, use it
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(p);
        } else {
            anyhow::bail!("Config file not found at specified path: {}", path);
        }
    }

    // Try ~/.config/tenderdesk/config.yaml
    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("tenderdesk").join("config.yaml");

        if config_path.exists() {
            return Ok(config_path);
        }
    }

    // Fallback to ./config.yaml
    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(local_config);
    }

    let expected_path = if let Some(config_dir) = dirs::config_dir() {
        config_dir
            .join("tenderdesk")
            .join("config.yaml")
            .display()
            .to_string()
    } else {
        "~/.config/tenderdesk/config.yaml".to_string()
    };

    anyhow::bail!(
        "Config file not found. Expected locations:\n\
         1. {} (preferred)\n\
         2. ./config.yaml (fallback)\n\
         \n\
         Use --config <path> to specify a custom location.",
        expected_path
    )
}
