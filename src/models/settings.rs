// Settings Model
// Theme controller configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Theme;

pub const ENV_STORAGE_KEY: &str = "THEME_SWITCHER_STORAGE_KEY";
pub const ENV_DEFAULT_THEME: &str = "THEME_SWITCHER_DEFAULT_THEME";
pub const ENV_LOG_LEVEL: &str = "THEME_SWITCHER_LOG_LEVEL";

fn default_storage_key() -> String {
    "daisy-theme".to_string()
}

fn default_theme() -> Theme {
    Theme::Light
}

fn default_mirror_body_attribute() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Theme controller settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    /// Key the applied theme is persisted under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Theme used when nothing valid is persisted or applied
    #[serde(default = "default_theme")]
    pub default_theme: Theme,

    /// Also write the theme attribute onto the body element
    #[serde(default = "default_mirror_body_attribute")]
    pub mirror_body_attribute: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            default_theme: default_theme(),
            mirror_body_attribute: default_mirror_body_attribute(),
            log_level: default_log_level(),
        }
    }
}

impl ThemeSettings {
    /// Load settings from a JSON file, filling missing keys with defaults.
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings: {e}"))?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse settings: {e}"))?;

        serde_json::from_value(value).map_err(|e| format!("Failed to parse settings: {e}"))
    }

    /// Apply `THEME_SWITCHER_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup. Invalid values are logged and ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_STORAGE_KEY) {
            let key = key.trim();
            if key.is_empty() {
                log::warn!("Ignoring empty {ENV_STORAGE_KEY}");
            } else {
                self.storage_key = key.to_string();
            }
        }

        if let Some(name) = lookup(ENV_DEFAULT_THEME) {
            match Theme::parse(&name) {
                Ok(theme) => self.default_theme = theme,
                Err(e) => log::warn!("Ignoring {ENV_DEFAULT_THEME}: {e}"),
            }
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level.trim().to_lowercase();
        }

        self
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = ThemeSettings::default();
        assert_eq!(settings.storage_key, "daisy-theme");
        assert_eq!(settings.default_theme, Theme::Light);
        assert!(settings.mirror_body_attribute);
        assert_eq!(settings.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp = tempdir().unwrap();
        let settings = ThemeSettings::load(&temp.path().join("settings.json")).unwrap();
        assert_eq!(settings, ThemeSettings::default());
    }

    #[test]
    fn test_load_fills_missing_keys() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(&path, r#"{ "defaultTheme": "nord", "mirrorBodyAttribute": false }"#).unwrap();

        let settings = ThemeSettings::load(&path).unwrap();
        assert_eq!(settings.default_theme, Theme::Nord);
        assert!(!settings.mirror_body_attribute);
        assert_eq!(settings.storage_key, "daisy-theme");
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_load_rejects_unknown_theme() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(&path, r#"{ "defaultTheme": "solarized" }"#).unwrap();

        let result = ThemeSettings::load(&path);
        assert!(result.unwrap_err().contains("parse"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_STORAGE_KEY, "my-theme"),
            (ENV_DEFAULT_THEME, " Dracula "),
            (ENV_LOG_LEVEL, "DEBUG"),
        ]);
        let settings = ThemeSettings::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.storage_key, "my-theme");
        assert_eq!(settings.default_theme, Theme::Dracula);
        assert_eq!(settings.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let env: HashMap<&str, &str> =
            HashMap::from([(ENV_STORAGE_KEY, "  "), (ENV_DEFAULT_THEME, "plaid")]);
        let settings = ThemeSettings::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings, ThemeSettings::default());
    }
}
