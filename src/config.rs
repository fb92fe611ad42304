use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

const CONFIG_DIR_NAME: &str = "valentine";
const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV: &str = "VALENTINE_CONFIG";

const DEFAULT_REJECTION_MESSAGES: [&str; 16] = [
    "Are you sure? 🥺",
    "Really sure?? 😢",
    "Think again! 💭",
    "Pretty please? 🙏",
    "But I made this just for you 💌",
    "The Yes button is right there 👉",
    "You're breaking my heart 💔",
    "I'll buy you snacks 🍫",
    "What if I said please with a cherry on top? 🍒",
    "The No button is getting tired 😮‍💨",
    "Okay now you're just playing 😤",
    "I'm not giving up 💪",
    "Error 404: 'No' not accepted 🤖",
    "You can't catch it anyway 🏃",
    "Look how small it's getting 🔍",
    "Just press Yes already 💕",
];

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub recipient: String,
    pub rejection_messages: Vec<String>,
    pub closing_lines: [String; 2],
    pub success_beep: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            recipient: "Tessa".to_string(),
            rejection_messages: DEFAULT_REJECTION_MESSAGES
                .iter()
                .map(|msg| msg.to_string())
                .collect(),
            closing_lines: [
                "i miss you so much".to_string(),
                "have a great day".to_string(),
            ],
            success_beep: false,
        }
    }
}

impl AppConfig {
    pub fn question(&self) -> String {
        if self.recipient.trim().is_empty() {
            "Will you be my Valentine? 💕".to_string()
        } else {
            format!("Hi {}, will you be my Valentine? 💕", self.recipient.trim())
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let mut config: AppConfig =
            serde_json::from_str(raw).context("config is not valid JSON")?;
        config
            .rejection_messages
            .retain(|msg| !msg.trim().is_empty());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Reads the user config if one exists. Missing files are silent; broken
    /// ones are logged and replaced by the defaults.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                log::info!(
                    "loaded config from {} ({} rejection messages)",
                    path.display(),
                    config.rejection_messages.len()
                );
                config
            }
            Err(err) => {
                log::warn!("{err:#}; using defaults");
                Self::default()
            }
        }
    }
}

fn config_path() -> PathBuf {
    match std::env::var(CONFIG_ENV) {
        Ok(explicit) if !explicit.trim().is_empty() => PathBuf::from(explicit),
        _ => glib::user_config_dir()
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_keeps_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config = AppConfig::from_json(
            r#"{ "recipient": "Sam", "rejection_messages": ["one", "  ", "two"] }"#,
        )
        .unwrap();
        assert_eq!(config.recipient, "Sam");
        assert_eq!(config.rejection_messages, vec!["one".to_string(), "two".to_string()]);
        assert_eq!(config.closing_lines, AppConfig::default().closing_lines);
        assert!(!config.success_beep);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = AppConfig::from_json("{ recipient: ").unwrap_err();
        assert!(format!("{err:#}").contains("not valid JSON"));
    }

    #[test]
    fn question_mentions_recipient() {
        let mut config = AppConfig::default();
        assert_eq!(config.question(), "Hi Tessa, will you be my Valentine? 💕");
        config.recipient = "  ".to_string();
        assert_eq!(config.question(), "Will you be my Valentine? 💕");
    }

    #[test]
    fn default_path_lives_under_user_config_dir() {
        if std::env::var_os(CONFIG_ENV).is_some() {
            return;
        }
        let path = config_path();
        assert!(path.starts_with(glib::user_config_dir()));
        assert!(path.ends_with("valentine/config.json"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::load_from(Path::new("/nonexistent/valentine.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/valentine.json"));
    }
}
