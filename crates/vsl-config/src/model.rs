use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Settings for one landing page deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Locale shown to the visitor.
    pub locale: String,
    /// Locale consulted when `locale` has no entry for a piece of copy.
    #[serde(default = "Config::default_locale_value")]
    pub default_locale: String,
    #[serde(default = "Config::default_require_form")]
    pub require_form: bool,
    #[serde(default = "Config::default_video_url")]
    pub video_url: String,
    /// Booking link opened by the page call to action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduling_url: Option<String>,
    /// JSON form schema to use instead of the stock lead form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<PathBuf>,
    /// Where captured leads are written. Defaults to `<base>/leads.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_store: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale_value(),
            default_locale: Self::default_locale_value(),
            require_form: Self::default_require_form(),
            video_url: Self::default_video_url(),
            scheduling_url: None,
            schema_path: None,
            lead_store: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 7] = [
        "locale",
        "default_locale",
        "require_form",
        "video_url",
        "scheduling_url",
        "schema_path",
        "lead_store",
    ];

    pub fn default_locale_value() -> String {
        "en".into()
    }

    pub fn default_require_form() -> bool {
        true
    }

    pub fn default_video_url() -> String {
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4".into()
    }

    pub fn resolve_lead_store(&self, base: &Path) -> PathBuf {
        self.lead_store
            .clone()
            .unwrap_or_else(|| base.join("leads.json"))
    }

    /// Current value of `key` rendered as text, `None` when unset.
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let value = match key {
            "locale" => Some(self.locale.clone()),
            "default_locale" => Some(self.default_locale.clone()),
            "require_form" => Some(self.require_form.to_string()),
            "video_url" => Some(self.video_url.clone()),
            "scheduling_url" => self.scheduling_url.clone(),
            "schema_path" => self.schema_path.as_ref().map(|p| p.display().to_string()),
            "lead_store" => self.lead_store.as_ref().map(|p| p.display().to_string()),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Updates `key` from text. An empty value clears optional settings.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "locale" => self.locale = non_empty(key, value)?,
            "default_locale" => self.default_locale = non_empty(key, value)?,
            "require_form" => self.require_form = parse_bool(key, value)?,
            "video_url" => self.video_url = non_empty(key, value)?,
            "scheduling_url" => self.scheduling_url = optional(value),
            "schema_path" => self.schema_path = optional(value).map(PathBuf::from),
            "lead_store" => self.lead_store = optional(value).map(PathBuf::from),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::InvalidSetting {
        key: key.to_string(),
        message: format!("unknown setting (expected one of: {})", Config::KEYS.join(", ")),
    }
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        Err(ConfigError::InvalidSetting {
            key: key.to_string(),
            message: "value cannot be empty".into(),
        })
    } else {
        Ok(value.to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "on" => Ok(true),
        "n" | "no" | "false" | "0" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidSetting {
            key: key.to_string(),
            message: "enter yes/no, true/false, or 1/0".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_round_trip_through_text() {
        let mut config = Config::default();
        config.set("locale", "es").unwrap();
        config.set("require_form", "no").unwrap();
        config
            .set("scheduling_url", "https://calendly.com/acme/intro")
            .unwrap();

        assert_eq!(config.get("locale").unwrap().as_deref(), Some("es"));
        assert_eq!(config.get("require_form").unwrap().as_deref(), Some("false"));
        assert!(config.scheduling_url.is_some());

        config.set("scheduling_url", "").unwrap();
        assert_eq!(config.get("scheduling_url").unwrap(), None);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("theme", "dark"),
            Err(ConfigError::InvalidSetting { .. })
        ));
        assert!(config.set("require_form", "maybe").is_err());
        assert!(config.set("locale", "  ").is_err());
        assert!(config.get("theme").is_err());
    }

    #[test]
    fn lead_store_defaults_under_base() {
        let config = Config::default();
        assert_eq!(
            config.resolve_lead_store(Path::new("/tmp/vsl")),
            PathBuf::from("/tmp/vsl/leads.json")
        );
    }
}
