//! Log playback scheduler.
//!
//! Plays a deterministic script as a timed sequence of terminal lines. At most
//! one run is active: starting a new run cancels the previous one, and lines
//! of a cancelled run are never emitted.

use archgo_core::playback::{LogEvent, Scenario, build_script};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
struct PlaybackState {
    /// Incremented on every start and cancel; stale runs compare against it.
    run_id: u64,
    events: Vec<LogEvent>,
    running: bool,
}

/// Receiving end of one playback run.
///
/// Yields lines in script order and ends after the completion marker or when
/// the run is cancelled. Dropping it does not stop the run.
#[derive(Debug)]
pub struct PlaybackRun {
    scenario: Scenario,
    receiver: mpsc::UnboundedReceiver<LogEvent>,
}

impl PlaybackRun {
    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    /// Waits for the next emitted line.
    pub async fn next(&mut self) -> Option<LogEvent> {
        self.receiver.recv().await
    }
}

/// Emits scripted log lines on a timer and keeps the emitted buffer.
#[derive(Debug, Default)]
pub struct LogPlaybackScheduler {
    state: Arc<Mutex<PlaybackState>>,
    cancel: Option<CancellationToken>,
}

impl LogPlaybackScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a run of `scenario` over `source`.
    ///
    /// Cancels any active run and empties the emitted buffer. Lines with a
    /// zero offset are emitted before this returns. Must be called from
    /// within a Tokio runtime.
    pub fn start(&mut self, scenario: Scenario, source: &str) -> PlaybackRun {
        self.cancel();

        let script = build_script(scenario, source);
        let total = script.len();
        let (tx, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let started = Instant::now();

        let run_id = {
            let mut state = lock(&self.state);
            state.run_id += 1;
            state.events.clear();
            state.running = true;
            state.run_id
        };

        let (immediate, delayed): (Vec<_>, Vec<_>) =
            script.into_iter().partition(|line| line.offset.is_zero());
        for line in immediate {
            emit(&self.state, run_id, scenario, line.message, &tx);
        }

        let state = Arc::clone(&self.state);
        let cancel = token.clone();
        tokio::spawn(async move {
            for line in delayed {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::debug!("[Playback] Run {} cancelled", run_id);
                        return;
                    }
                    _ = sleep_until(started + line.offset) => {}
                }
                if !emit(&state, run_id, scenario, line.message, &tx) {
                    return;
                }
            }
        });

        self.cancel = Some(token);
        tracing::info!("[Playback] Started {} run ({} lines)", scenario, total);

        PlaybackRun {
            scenario,
            receiver: rx,
        }
    }

    /// Stops the active run, if any. Already emitted lines are kept.
    pub fn cancel(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        let mut state = lock(&self.state);
        if state.running {
            tracing::debug!("[Playback] Cancelling run {}", state.run_id);
        }
        state.run_id += 1;
        state.running = false;
    }

    /// Empties the emitted buffer. An active run keeps emitting.
    pub fn clear(&self) {
        lock(&self.state).events.clear();
    }

    /// Lines emitted so far in the current run.
    pub fn emitted(&self) -> Vec<LogEvent> {
        lock(&self.state).events.clone()
    }

    /// True from start until the completion marker has been emitted.
    pub fn is_running(&self) -> bool {
        lock(&self.state).running
    }
}

impl Drop for LogPlaybackScheduler {
    fn drop(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}

fn lock(state: &Mutex<PlaybackState>) -> MutexGuard<'_, PlaybackState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Stamps and records one line. Returns false when the run is stale.
fn emit(
    state: &Mutex<PlaybackState>,
    run_id: u64,
    scenario: Scenario,
    message: String,
    tx: &mpsc::UnboundedSender<LogEvent>,
) -> bool {
    let event = {
        let mut state = lock(state);
        if state.run_id != run_id {
            return false;
        }
        let event = LogEvent::now(message);
        if event.message == scenario.completion_marker() {
            state.running = false;
        }
        state.events.push(event.clone());
        event
    };

    // The receiver may have been dropped; the buffer is still authoritative.
    let _ = tx.send(event);
    true
}
