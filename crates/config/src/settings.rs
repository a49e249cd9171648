// Application settings
// Loaded from ~/.config/gridhub/settings.json

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Keys understood by `get`/`set`, in display order.
pub const SETTING_KEYS: &[&str] = &["registry.url", "values.url", "sheet.default"];

/// Environment overrides, checked before the settings file.
pub const REGISTRY_URL_ENV: &str = "GRIDHUB_REGISTRY_URL";
pub const VALUES_URL_ENV: &str = "GRIDHUB_VALUES_URL";
pub const SHEET_ENV: &str = "GRIDHUB_SHEET";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Registry backend (spreadsheet and cell records)
    #[serde(rename = "registry.url")]
    pub registry_url: String,

    // Values API (cell contents, keyed by external sheet id)
    #[serde(rename = "values.url")]
    pub values_url: String,

    // Sheet used when no id is given on the command line
    #[serde(rename = "sheet.default")]
    pub default_sheet: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry_url: "http://127.0.0.1:8000".to_string(),
            values_url: "https://sheets.googleapis.com/v4/spreadsheets".to_string(),
            default_sheet: None,
        }
    }
}

impl Settings {
    /// Settings file path under the platform config directory.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridhub");
        config_dir.join("settings.json")
    }

    /// Load from disk, writing a starter file on first run.
    /// Unreadable or unparseable files fall back to defaults; never fails.
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file();
            return settings;
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Error parsing settings.json: {}", e);
                    eprintln!("Using default settings");
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading settings.json: {}", e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON, ignoring // comment lines.
    fn from_json_str(contents: &str) -> Result<Self, serde_json::Error> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&cleaned)
    }

    /// Write the settings back out, pretty-printed.
    pub fn save(&self) -> Result<(), String> {
        let path = Self::config_path();

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(&path, json).map_err(|e| e.to_string())
    }

    /// Write the commented starter template.
    fn create_default_file(&self) {
        let path = Self::config_path();

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r#"{
    // Registry backend (spreadsheet and cell records)
    "registry.url": "http://127.0.0.1:8000",

    // Values API (cell contents, keyed by external sheet id)
    "values.url": "https://sheets.googleapis.com/v4/spreadsheets",

    // Sheet used when no id is given on the command line
    "sheet.default": null

    // The values API key is never stored in this file.
    // Store it in the system keychain or set GRIDHUB_API_KEY.
}
"#;

        if let Err(e) = fs::write(&path, default_config) {
            eprintln!("Error writing default settings.json: {}", e);
        }
    }

    /// Path rendered for `ghub config path`.
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }

    /// Registry URL with the environment override applied.
    pub fn effective_registry_url(&self) -> String {
        match env::var(REGISTRY_URL_ENV) {
            Ok(v) if !v.is_empty() => v,
            _ => self.registry_url.clone(),
        }
    }

    /// Values API URL with the environment override applied.
    pub fn effective_values_url(&self) -> String {
        match env::var(VALUES_URL_ENV) {
            Ok(v) if !v.is_empty() => v,
            _ => self.values_url.clone(),
        }
    }

    /// Default sheet with the environment override applied.
    pub fn effective_sheet(&self) -> Option<String> {
        match env::var(SHEET_ENV) {
            Ok(v) if !v.is_empty() => Some(v),
            _ => self.default_sheet.clone(),
        }
    }

    /// Read one setting by its dotted key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "registry.url" => Some(self.registry_url.clone()),
            "values.url" => Some(self.values_url.clone()),
            "sheet.default" => Some(self.default_sheet.clone().unwrap_or_default()),
            _ => None,
        }
    }

    /// Write one setting by its dotted key. An empty value clears
    /// `sheet.default`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "registry.url" => self.registry_url = value.to_string(),
            "values.url" => self.values_url = value.to_string(),
            "sheet.default" => {
                self.default_sheet = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            _ => {
                return Err(format!(
                    "Unknown setting '{}'. Valid keys: {}",
                    key,
                    SETTING_KEYS.join(", ")
                ));
            }
        }
        Ok(())
    }
}
