use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, TillError};
use crate::fmt::{Codec, DEFAULT_SYMBOL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    #[serde(default)]
    pub decimal_digits: u32,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// `salt$digest`, both hex. Absent when no passcode is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passcode_hash: Option<String>,
}

fn default_currency_symbol() -> String {
    DEFAULT_SYMBOL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            decimal_digits: 0,
            currency_symbol: default_currency_symbol(),
            passcode_hash: None,
        }
    }
}

impl Settings {
    /// The amount codec for the configured precision. A bad precision in a
    /// hand-edited file falls back to whole units.
    pub fn codec(&self) -> Codec {
        Codec::new(self.decimal_digits, &self.currency_symbol).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring configured precision");
            Codec::new(0, &self.currency_symbol).unwrap_or_default()
        })
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tillbook")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("tillbook")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        parse_settings(&content)
    } else {
        Settings::default()
    }
}

fn parse_settings(content: &str) -> Settings {
    serde_json::from_str(content).unwrap_or_else(|e| {
        warn!(error = %e, "settings.json is unreadable, using defaults");
        Settings::default()
    })
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| TillError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn settings_file_exists() -> bool {
    settings_path().exists()
}

pub fn get_data_dir() -> PathBuf {
    PathBuf::from(&load_settings().data_dir)
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
