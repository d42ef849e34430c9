use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
    /// Overrides the first-and-third-product default selection when set.
    #[serde(default)]
    pub default_products: Option<Vec<String>>,
}

fn default_data_file() -> String {
    "bakerysales.csv".to_string()
}

fn default_preview_rows() -> usize {
    50
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            preview_rows: default_preview_rows(),
            default_products: None,
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("bakery")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if !path.exists() {
        return Settings::default();
    }
    let content = std::fs::read_to_string(&path).unwrap_or_default();
    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable settings at {}: {e}", path.display());
        Settings::default()
    })
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

/// The data file to read: an explicit `--file` wins over the saved setting.
pub fn resolve_data_file(file: Option<&str>) -> PathBuf {
    match file {
        Some(f) => PathBuf::from(f),
        None => PathBuf::from(load_settings().data_file),
    }
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
