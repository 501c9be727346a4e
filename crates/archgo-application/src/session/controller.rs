//! Session controller: the state machine behind one user session.

use crate::playback_scheduler::{LogPlaybackScheduler, PlaybackRun};
use archgo_core::analysis::{AnalysisBackend, AnalysisResult};
use archgo_core::export::SecurityReport;
use archgo_core::identity::{Identity, IdentityProvider, LoginRequest};
use archgo_core::playback::Scenario;
use archgo_core::session::{PendingInput, Phase, RawFile, Session};
use archgo_core::vault::{VaultEntry, VaultStore, derive_title};
use archgo_core::{ArchGoError, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Settlement of one `analyze` call, tagged with the epoch it was issued in.
struct AnalysisOutcome {
    epoch: u64,
    result: Result<AnalysisResult>,
}

/// Drives a [`Session`] through its phases.
///
/// The controller is single-owner: every transition takes `&mut self`. The
/// only concurrent work is the in-flight `analyze` call, which runs on a Tokio
/// task and reports back through a channel; [`SessionController::next_outcome`]
/// applies it. Logging out bumps the epoch so a late outcome is dropped.
pub struct SessionController {
    session: Session,
    backend: Arc<dyn AnalysisBackend>,
    identity_provider: Arc<dyn IdentityProvider>,
    vault: VaultStore,
    vault_entries: Vec<VaultEntry>,
    playback: LogPlaybackScheduler,
    epoch: u64,
    outcome_tx: mpsc::UnboundedSender<AnalysisOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<AnalysisOutcome>,
}

impl SessionController {
    pub fn new(
        backend: Arc<dyn AnalysisBackend>,
        identity_provider: Arc<dyn IdentityProvider>,
        vault: VaultStore,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            session: Session::new(),
            backend,
            identity_provider,
            vault,
            vault_entries: Vec::new(),
            playback: LogPlaybackScheduler::new(),
            epoch: 0,
            outcome_tx,
            outcome_rx,
        }
    }

    // ============================================================================
    // Read access
    // ============================================================================

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.identity.as_ref()
    }

    pub fn pending_input(&self) -> &PendingInput {
        &self.session.pending_input
    }

    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.session.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.session.last_error.as_deref()
    }

    /// True once the current result has been saved.
    pub fn is_result_saved(&self) -> bool {
        self.session.result_saved
    }

    /// Vault entries as of the last refresh, newest first.
    pub fn vault_entries(&self) -> &[VaultEntry] {
        &self.vault_entries
    }

    pub fn playback(&self) -> &LogPlaybackScheduler {
        &self.playback
    }

    // ============================================================================
    // Navigation
    // ============================================================================

    /// Leaves the landing page: straight to the dashboard when already signed in.
    pub fn start(&mut self) -> Result<()> {
        self.require_phase(Phase::Landing, "start")?;
        if self.session.identity.is_some() {
            self.enter_idle();
        } else {
            self.set_phase(Phase::Login);
        }
        Ok(())
    }

    /// Resolves `request` through the identity provider and signs in.
    ///
    /// On failure the session stays on the login screen.
    pub async fn login(&mut self, request: LoginRequest) -> Result<&Identity> {
        self.require_phase(Phase::Login, "login")?;
        let identity = self.identity_provider.login(request).await?;
        self.login_succeeded(identity)?;
        self.identity()
            .ok_or_else(|| ArchGoError::internal("identity missing after login"))
    }

    /// Accepts an identity produced outside the configured provider.
    pub fn login_succeeded(&mut self, identity: Identity) -> Result<()> {
        self.require_phase(Phase::Login, "login")?;
        tracing::info!("[Session] Signed in as {} ({})", identity.name, identity.role);
        self.session.identity = Some(identity);
        self.enter_idle();
        Ok(())
    }

    /// Header logo: back to an empty dashboard, or to the landing page when
    /// signed out.
    pub fn logo_click(&mut self) -> Result<()> {
        if self.session.identity.is_none() {
            self.set_phase(Phase::Landing);
            return Ok(());
        }
        if self.session.phase == Phase::Analyzing {
            return Err(self.refuse("return to the dashboard"));
        }
        self.session.clear_workspace();
        self.enter_idle();
        Ok(())
    }

    pub fn retry(&mut self) -> Result<()> {
        self.require_phase(Phase::Error, "retry")?;
        self.enter_idle();
        Ok(())
    }

    pub fn reset(&mut self) -> Result<()> {
        self.require_phase(Phase::Result, "reset")?;
        self.session.clear_workspace();
        self.enter_idle();
        Ok(())
    }

    /// Signs out from any phase and abandons in-flight work.
    ///
    /// A pending analysis keeps running on the backend but its outcome is
    /// discarded. Playback stops.
    pub fn logout(&mut self) -> Result<()> {
        if self.session.identity.is_none() {
            return Err(self.refuse("log out"));
        }

        self.epoch += 1;
        self.playback.cancel();
        self.playback.clear();

        self.session.identity = None;
        self.session.clear_workspace();
        self.session.last_error = None;
        self.set_phase(Phase::Landing);
        tracing::info!("[Session] Signed out");
        Ok(())
    }

    // ============================================================================
    // Dashboard input
    // ============================================================================

    pub fn set_context(&mut self, text: impl Into<String>) -> Result<()> {
        self.require_phase(Phase::Idle, "edit the context")?;
        self.session.pending_input.free_text_context = text.into();
        Ok(())
    }

    /// Attaches a file together with its `data:` URI preview.
    pub fn attach_file(&mut self, file: RawFile, encoded_preview: String) -> Result<()> {
        self.require_phase(Phase::Idle, "attach a file")?;
        tracing::debug!("[Session] Attached {} ({})", file.name, file.mime_type);
        self.session.pending_input.raw_file = Some(file);
        self.session.pending_input.encoded_preview = Some(encoded_preview);
        Ok(())
    }

    pub fn clear_attachment(&mut self) -> Result<()> {
        self.require_phase(Phase::Idle, "remove the attachment")?;
        self.session.pending_input.raw_file = None;
        self.session.pending_input.encoded_preview = None;
        Ok(())
    }

    // ============================================================================
    // Analysis
    // ============================================================================

    /// Starts analysis of the pending input.
    ///
    /// Returns `Ok(false)` without changing anything when there is nothing to
    /// analyze. On `Ok(true)` the session is in `Analyzing` and the outcome is
    /// delivered through [`SessionController::next_outcome`]. A backend call
    /// that panics settles as `BackendUnavailable`.
    ///
    /// Spawns onto the current Tokio runtime; panics when called outside one.
    pub fn submit(&mut self) -> Result<bool> {
        self.require_phase(Phase::Idle, "submit")?;

        let input = &self.session.pending_input;
        if !input.is_submittable() {
            tracing::debug!("[Session] Ignoring submit with empty input");
            return Ok(false);
        }

        let request = archgo_interaction::build_request(
            input.encoded_preview.as_deref(),
            &input.free_text_context,
        )?;

        self.set_phase(Phase::Analyzing);

        let backend = Arc::clone(&self.backend);
        let tx = self.outcome_tx.clone();
        let epoch = self.epoch;
        let call = tokio::spawn(async move { backend.analyze(&request).await });
        tokio::spawn(async move {
            let result = match call.await {
                Ok(result) => result,
                Err(e) => Err(ArchGoError::backend_unavailable(format!(
                    "analysis task aborted: {}",
                    e
                ))),
            };
            // The controller may be gone; nothing left to notify.
            let _ = tx.send(AnalysisOutcome { epoch, result });
        });

        tracing::info!("[Session] Analysis submitted");
        Ok(true)
    }

    /// Waits for the in-flight analysis to settle and applies it.
    ///
    /// Returns `None` when no analysis is in flight. Outcomes issued before a
    /// logout are skipped.
    pub async fn next_outcome(&mut self) -> Option<Phase> {
        while self.session.phase == Phase::Analyzing {
            let outcome = self.outcome_rx.recv().await?;
            if outcome.epoch != self.epoch {
                tracing::debug!(
                    "[Session] Dropping outcome from abandoned epoch {}",
                    outcome.epoch
                );
                continue;
            }
            match outcome.result {
                Ok(result) => self.analysis_succeeded(result),
                Err(e) => self.analysis_failed(&e),
            }
            return Some(self.session.phase);
        }
        None
    }

    /// Submits and waits for the outcome.
    ///
    /// Returns the phase the session settled in, or `Idle` when the input was
    /// empty.
    pub async fn submit_and_wait(&mut self) -> Result<Phase> {
        if !self.submit()? {
            return Ok(self.session.phase);
        }
        Ok(self.next_outcome().await.unwrap_or(self.session.phase))
    }

    fn analysis_succeeded(&mut self, result: AnalysisResult) {
        tracing::info!(
            "[Session] Analysis complete (viability {})",
            result.viability_score
        );
        self.session.last_result = Some(result);
        self.session.result_saved = false;
        self.set_phase(Phase::Result);
    }

    fn analysis_failed(&mut self, error: &ArchGoError) {
        tracing::error!("[Session] Analysis failed: {}", error);
        self.session.last_error = Some(error.user_message());
        self.set_phase(Phase::Error);
    }

    // ============================================================================
    // Vault
    // ============================================================================

    /// Saves the current result. The title defaults to one derived from the
    /// pending free text.
    pub fn save_to_vault(&mut self, title: Option<&str>) -> Result<VaultEntry> {
        self.require_phase(Phase::Result, "save")?;
        let result = self
            .session
            .last_result
            .clone()
            .ok_or_else(|| self.refuse("save"))?;

        let title = match title {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => derive_title(&self.session.pending_input.free_text_context),
        };

        let entry = self.vault.save(result, Some(&title))?;
        self.session.result_saved = true;
        self.refresh_vault();
        Ok(entry)
    }

    /// Shows a saved entry as the current result.
    pub fn open_vault_entry(&mut self, id: &str) -> Result<()> {
        self.require_phase(Phase::Idle, "open a vault entry")?;
        let entry = self
            .vault
            .get(id)
            .ok_or_else(|| ArchGoError::invalid_input(format!("no vault entry with id {id}")))?;

        tracing::info!("[Session] Opened vault entry {}", entry.id);
        self.session.last_result = Some(entry.result);
        self.session.result_saved = false;
        self.set_phase(Phase::Result);
        Ok(())
    }

    pub fn delete_vault_entry(&mut self, id: &str) -> Result<()> {
        if self.session.identity.is_none() {
            return Err(self.refuse("delete a vault entry"));
        }
        self.vault_entries = self.vault.delete(id)?;
        Ok(())
    }

    pub fn refresh_vault(&mut self) {
        self.vault_entries = self.vault.list();
    }

    // ============================================================================
    // Result tools
    // ============================================================================

    /// Builds the downloadable security report for the current result.
    pub fn export_security_report(&self) -> Result<SecurityReport> {
        self.require_phase(Phase::Result, "export the security report")?;
        let result = self
            .last_result()
            .ok_or_else(|| self.refuse("export the security report"))?;
        Ok(SecurityReport::from_result(result, Utc::now()))
    }

    /// Plays `scenario` over the current result's generated server logic.
    ///
    /// Spawns onto the current Tokio runtime; panics when called outside one.
    pub fn run_playback(&mut self, scenario: Scenario) -> Result<PlaybackRun> {
        self.require_phase(Phase::Result, "run a playback")?;
        let source = self
            .session
            .last_result
            .as_ref()
            .map(|result| result.backend_impl.clone())
            .ok_or_else(|| self.refuse("run a playback"))?;
        Ok(self.playback.start(scenario, &source))
    }

    pub fn clear_playback(&self) {
        self.playback.clear();
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn require_phase(&self, expected: Phase, action: &str) -> Result<()> {
        if self.session.phase == expected {
            Ok(())
        } else {
            Err(self.refuse(action))
        }
    }

    fn refuse(&self, action: &str) -> ArchGoError {
        ArchGoError::invalid_transition(self.session.phase, action)
    }

    fn enter_idle(&mut self) {
        self.set_phase(Phase::Idle);
        self.refresh_vault();
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.session.phase;
        if from == Phase::Error && to != Phase::Error {
            self.session.last_error = None;
        }
        self.session.phase = to;
        tracing::debug!("[Session] {} -> {}", from, to);
    }
}
