//! Loads `config.toml` and `secret.json`.

use crate::paths::ArchGoPaths;
use archgo_core::config::{AppConfig, SecretConfig};
use archgo_core::{ArchGoError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables checked, in order, before `secret.json`.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// File-based configuration service.
#[derive(Debug, Clone)]
pub struct ConfigService {
    config_path: PathBuf,
    secret_path: PathBuf,
}

impl ConfigService {
    pub fn new(config_path: impl Into<PathBuf>, secret_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            secret_path: secret_path.into(),
        }
    }

    /// Uses the platform config directory.
    pub fn from_default_paths() -> Result<Self> {
        Ok(Self::new(
            ArchGoPaths::config_file()?,
            ArchGoPaths::secret_file()?,
        ))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads `config.toml`. A missing or empty file yields the defaults.
    pub fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            tracing::debug!("[Config] {:?} not found, using defaults", self.config_path);
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)?;
        toml::from_str(&content).map_err(|e| {
            ArchGoError::config(format!("Invalid config file {:?}: {}", self.config_path, e))
        })
    }

    /// Loads `secret.json`. A missing file yields an empty configuration.
    pub fn load_secrets(&self) -> Result<SecretConfig> {
        if !self.secret_path.exists() {
            return Ok(SecretConfig::default());
        }

        let content = fs::read_to_string(&self.secret_path)?;
        serde_json::from_str(&content)
            .map_err(|e| ArchGoError::config(format!("Invalid secret file: {}", e)))
    }

    /// Resolves the Gemini API key from the environment or `secret.json`.
    pub fn gemini_api_key(&self) -> Result<String> {
        let from_env = API_KEY_ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok());
        resolve_api_key(from_env, &self.load_secrets()?)
    }

    /// Returns the configured vault file, falling back to the data directory.
    pub fn vault_file(&self, config: &AppConfig) -> Result<PathBuf> {
        match &config.storage.vault_file {
            Some(path) => Ok(path.clone()),
            None => Ok(ArchGoPaths::vault_file()?),
        }
    }
}

fn resolve_api_key(from_env: Option<String>, secrets: &SecretConfig) -> Result<String> {
    from_env
        .filter(|key| !key.trim().is_empty())
        .or_else(|| {
            secrets
                .gemini
                .as_ref()
                .map(|gemini| gemini.api_key.clone())
                .filter(|key| !key.trim().is_empty())
        })
        .ok_or_else(|| {
            ArchGoError::config(format!(
                "Gemini API key not found: set {} or add gemini.api_key to secret.json",
                API_KEY_ENV_VARS[0]
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgo_core::config::GeminiSecret;
    use tempfile::TempDir;

    fn service_in(dir: &TempDir) -> ConfigService {
        ConfigService::new(dir.path().join("config.toml"), dir.path().join("secret.json"))
    }

    #[test]
    fn test_missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        let config = service_in(&dir).load_config().unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_config_file_overrides() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[storage]\nvault_file = \"/tmp/custom-vault.json\"\n",
        )
        .unwrap();

        let service = service_in(&dir);
        let config = service.load_config().unwrap();
        assert_eq!(
            service.vault_file(&config).unwrap(),
            PathBuf::from("/tmp/custom-vault.json")
        );
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "[analysis\nmodel =").unwrap();

        let err = service_in(&dir).load_config().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_secret_file_is_read() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("secret.json"),
            r#"{ "gemini": { "api_key": "from-file" } }"#,
        )
        .unwrap();

        let secrets = service_in(&dir).load_secrets().unwrap();
        assert_eq!(resolve_api_key(None, &secrets).unwrap(), "from-file");
    }

    #[test]
    fn test_env_key_wins_over_secret_file() {
        let secrets = SecretConfig {
            gemini: Some(GeminiSecret {
                api_key: "from-file".to_string(),
            }),
        };
        let key = resolve_api_key(Some("from-env".to_string()), &secrets).unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let err = resolve_api_key(Some("  ".to_string()), &SecretConfig::default()).unwrap_err();
        assert!(err.is_config());
    }
}
