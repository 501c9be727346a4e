//! Configuration model (`config.toml` and `secret.json`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisSettings,
    pub identity: IdentitySettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    pub model: String,
    pub base_url: String,
    /// Reasoning token budget granted to the model.
    pub thinking_budget: u32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            thinking_budget: 16384,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct IdentitySettings {
    /// Simulated network delay of the login stub.
    pub login_delay_ms: u64,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            login_delay_ms: 1500,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct StorageSettings {
    /// Overrides the vault file location.
    pub vault_file: Option<PathBuf>,
    /// Directory security reports are exported to; defaults to the working directory.
    pub export_dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub file_logging: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: false,
        }
    }
}

/// Contents of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiSecret>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeminiSecret {
    pub api_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [analysis]
            model = "gemini-2.5-flash"

            [identity]
            login_delay_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.analysis.model, "gemini-2.5-flash");
        assert_eq!(config.analysis.thinking_budget, 16384);
        assert_eq!(config.identity.login_delay_ms, 0);
        assert_eq!(config.logging.level, "info");
        assert!(config.storage.vault_file.is_none());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
