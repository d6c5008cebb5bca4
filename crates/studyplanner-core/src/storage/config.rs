//! TOML-based application configuration.
//!
//! Stores the defaults the CLI applies when a request leaves them out:
//! - Preferred time-of-day windows
//! - Attention span and break insertion
//! - Output formatting
//!
//! Configuration is stored at `~/.config/studyplanner/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::schedule::{Preferences, DEFAULT_ATTENTION_SPAN};

/// Default scheduling preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesConfig {
    #[serde(default = "default_preferred_times")]
    pub preferred_times: Vec<String>,
    #[serde(default = "default_attention_span")]
    pub attention_span: i64,
    #[serde(default)]
    pub prefer_breaks: bool,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub pretty: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyplanner/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub preferences: PreferencesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// Default functions
fn default_preferred_times() -> Vec<String> {
    vec!["morning".into(), "afternoon".into(), "evening".into()]
}
fn default_attention_span() -> i64 {
    DEFAULT_ATTENTION_SPAN
}
fn default_true() -> bool {
    true
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            preferred_times: default_preferred_times(),
            attention_span: default_attention_span(),
            prefer_breaks: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl PreferencesConfig {
    /// Preferences built entirely from configured defaults.
    pub fn to_preferences(&self) -> Preferences {
        Preferences {
            preferred_times: self.preferred_times.clone(),
            attention_span: Some(self.attention_span),
            prefer_breaks: Some(self.prefer_breaks),
        }
    }

    /// Fill what `preferences` left unset from configured defaults.
    pub fn fill(&self, mut preferences: Preferences) -> Preferences {
        preferences.attention_span = preferences.attention_span.or(Some(self.attention_span));
        preferences.prefer_breaks = preferences.prefer_breaks.or(Some(self.prefer_breaks));
        preferences
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<()> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown().into());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<i64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Array(_) => {
                        // Accept either a JSON array or a comma-separated list
                        if value.trim_start().starts_with('[') {
                            serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                        } else {
                            serde_json::Value::Array(
                                value
                                    .split(',')
                                    .map(str::trim)
                                    .filter(|s| !s.is_empty())
                                    .map(|s| serde_json::Value::String(s.to_string()))
                                    .collect(),
                            )
                        }
                    }
                    serde_json::Value::Object(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown().into())
    }

    /// Location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without persisting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.preferences.attention_span, 60);
        assert!(parsed.output.pretty);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let parsed: Config = toml::from_str("[preferences]\nprefer_breaks = true\n").unwrap();
        assert!(parsed.preferences.prefer_breaks);
        assert_eq!(parsed.preferences.preferred_times.len(), 3);
        assert!(parsed.output.pretty);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("preferences.attention_span").as_deref(), Some("60"));
        assert_eq!(cfg.get("output.pretty").as_deref(), Some("true"));
        assert!(cfg.get("preferences.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_number_and_bool() {
        let mut cfg = Config::default();
        cfg.set("preferences.attention_span", "45").unwrap();
        cfg.set("preferences.prefer_breaks", "true").unwrap();
        assert_eq!(cfg.preferences.attention_span, 45);
        assert!(cfg.preferences.prefer_breaks);
    }

    #[test]
    fn set_accepts_comma_separated_list() {
        let mut cfg = Config::default();
        cfg.set("preferences.preferred_times", "night, morning").unwrap();
        assert_eq!(cfg.preferences.preferred_times, vec!["night", "morning"]);

        cfg.set("preferences.preferred_times", r#"["evening"]"#).unwrap();
        assert_eq!(cfg.preferences.preferred_times, vec!["evening"]);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set("preferences.nonexistent_key", "value").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("output.pretty", "not_a_bool").is_err());
        assert!(cfg.set("preferences.attention_span", "long").is_err());
        assert_eq!(cfg.preferences.attention_span, 60);
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.preferences.attention_span, 60);
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.set("preferences.preferred_times", "night").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.preferences.preferred_times, vec!["night"]);
    }

    #[test]
    fn malformed_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "preferences = 3").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::LoadFailed { .. })));
    }

    #[test]
    fn fill_keeps_request_values() {
        let cfg = PreferencesConfig {
            attention_span: 25,
            prefer_breaks: true,
            ..PreferencesConfig::default()
        };
        let filled = cfg.fill(Preferences::new(["night"]));
        assert_eq!(filled.attention_span(), 25);
        assert!(filled.prefer_breaks());
        assert_eq!(filled.preferred_times, vec!["night"]);

        let explicit = cfg.fill(
            Preferences::new(["night"])
                .with_attention_span(90)
                .with_breaks(false),
        );
        assert_eq!(explicit.attention_span(), 90);
        assert!(!explicit.prefer_breaks());
    }

    #[test]
    fn fill_applies_configured_breaks_to_partial_request() {
        let cfg = PreferencesConfig {
            prefer_breaks: true,
            ..PreferencesConfig::default()
        };
        let request: Preferences =
            serde_json::from_str(r#"{"preferredTimes": ["afternoon"], "attentionSpan": 30}"#)
                .unwrap();

        let filled = cfg.fill(request);
        assert_eq!(filled.prefer_breaks, Some(true));
        assert_eq!(filled.attention_span(), 30);
    }
}
