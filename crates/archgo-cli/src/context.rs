//! Wires configuration to the concrete collaborators.

use anyhow::{Context, Result};
use archgo_core::ArchGoError;
use archgo_core::analysis::{AnalysisBackend, AnalysisRequest, AnalysisResult};
use archgo_core::config::AppConfig;
use archgo_core::identity::IdentityProvider;
use archgo_core::vault::VaultStore;
use archgo_infrastructure::paths::ArchGoPaths;
use archgo_infrastructure::{ConfigService, JsonFileStore, MockIdentityProvider};
use archgo_interaction::GeminiAnalysisClient;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub struct AppContext {
    pub config: AppConfig,
    config_service: ConfigService,
}

impl AppContext {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_service = match config_override {
            Some(path) => ConfigService::new(path, ArchGoPaths::secret_file()?),
            None => ConfigService::from_default_paths()?,
        };
        let config = config_service
            .load_config()
            .with_context(|| format!("Failed to load {:?}", config_service.config_path()))?;

        Ok(Self {
            config,
            config_service,
        })
    }

    pub fn vault_store(&self) -> Result<VaultStore> {
        let path = self.config_service.vault_file(&self.config)?;
        tracing::debug!("[Vault] Using {:?}", path);
        Ok(VaultStore::new(Arc::new(JsonFileStore::new(path))))
    }

    /// Builds the Gemini client. Fails when no API key is configured.
    pub fn backend(&self) -> Result<Arc<dyn AnalysisBackend>> {
        let api_key = self
            .config_service
            .gemini_api_key()
            .context("Set GEMINI_API_KEY or add gemini.api_key to secret.json")?;
        let client = GeminiAnalysisClient::from_settings(&self.config.analysis, api_key);
        tracing::debug!("[Gemini] Using model {}", client.model());
        Ok(Arc::new(client))
    }

    /// Like [`AppContext::backend`], but a missing key only fails at the first
    /// analysis, so the shell stays usable for the vault and exports.
    pub fn backend_or_unconfigured(&self) -> Arc<dyn AnalysisBackend> {
        match self.backend() {
            Ok(backend) => backend,
            Err(e) => {
                tracing::warn!("[Gemini] Analysis disabled: {:#}", e);
                Arc::new(UnconfiguredBackend {
                    reason: format!("{:#}", e),
                })
            }
        }
    }

    pub fn identity_provider(&self) -> Arc<dyn IdentityProvider> {
        Arc::new(MockIdentityProvider::new(Duration::from_millis(
            self.config.identity.login_delay_ms,
        )))
    }

    /// `dir` when given, else the configured export directory, else the
    /// working directory.
    pub fn export_dir(&self, dir: Option<&Path>) -> PathBuf {
        dir.map(Path::to_path_buf)
            .or_else(|| self.config.storage.export_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Stands in for the Gemini client when no API key could be resolved.
struct UnconfiguredBackend {
    reason: String,
}

#[async_trait]
impl AnalysisBackend for UnconfiguredBackend {
    async fn analyze(
        &self,
        _request: &AnalysisRequest,
    ) -> archgo_core::Result<AnalysisResult> {
        Err(ArchGoError::config(self.reason.clone()))
    }
}
