use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::assets::ClipLibrary;
use super::sequencer::{sequence, Unit};
use super::sink::AudioSink;

/// Terminal state of a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// The whole sequence was dispatched, possibly with skipped units
    Finished,
    /// Cancelled between units before the end of the sequence
    Cancelled,
    /// The worker terminated abnormally
    Error,
}

/// Errors starting a playback session
#[derive(Debug, Error)]
pub enum SessionError {
    /// Another session owns the output device
    #[error("another playback session is active")]
    Busy,
}

/// Handle to an in-flight playback session.
///
/// Dropping the handle does not stop playback; the worker runs the
/// sequence to completion unless cancelled.
pub struct SessionHandle {
    cancel: Arc<AtomicBool>,
    completion: oneshot::Receiver<SessionStatus>,
}

impl SessionHandle {
    /// Request cancellation. Takes effect between units, never mid-unit.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Wait for the session to complete.
    pub async fn wait(self) -> SessionStatus {
        self.completion.await.unwrap_or(SessionStatus::Error)
    }

    /// Non-blocking completion check. `None` while the session is running.
    pub fn try_status(&mut self) -> Option<SessionStatus> {
        match self.completion.try_recv() {
            Ok(status) => Some(status),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(SessionStatus::Error),
        }
    }
}

/// Sequential playback driver.
///
/// At most one session is active at a time; the worker owns its session's
/// state exclusively for the session's lifetime.
pub struct PlaybackEngine {
    library: Arc<ClipLibrary>,
    sink: Arc<dyn AudioSink>,
    active: Arc<AtomicBool>,
}

impl PlaybackEngine {
    /// Creates an engine over the given clip library and sink.
    #[must_use]
    pub fn new(library: Arc<ClipLibrary>, sink: Arc<dyn AudioSink>) -> Self {
        Self {
            library,
            sink,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start playing a Morse code string on the background worker.
    ///
    /// Units play strictly in scan order; each unit finishes before the
    /// next begins. Unresolved clips and per-unit sink failures are logged
    /// and skipped, never fatal.
    ///
    /// # Errors
    /// Returns `SessionError::Busy` while another session is active. The
    /// caller decides whether to wait or cancel the prior session.
    pub fn start(&self, code: &str) -> Result<SessionHandle, SessionError> {
        if self.active.swap(true, Ordering::SeqCst) {
            debug!("start rejected, session already active");
            return Err(SessionError::Busy);
        }

        let units = sequence(code);
        info!(units = units.len(), "playback session starting");

        let cancel = Arc::new(AtomicBool::new(false));
        let (completion_tx, completion_rx) = oneshot::channel();

        let library = Arc::clone(&self.library);
        let sink = Arc::clone(&self.sink);
        let active = Arc::clone(&self.active);
        let cancel_worker = Arc::clone(&cancel);

        tokio::task::spawn_blocking(move || {
            let status = run_units(&units, &library, sink.as_ref(), &cancel_worker);
            active.store(false, Ordering::SeqCst);
            if completion_tx.send(status).is_err() {
                debug!("session handle dropped before completion");
            }
        });

        Ok(SessionHandle {
            cancel,
            completion: completion_rx,
        })
    }

    /// Whether a session is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Plays units strictly sequentially, polling the cancel flag between them.
fn run_units(
    units: &[Unit],
    library: &ClipLibrary,
    sink: &dyn AudioSink,
    cancel: &AtomicBool,
) -> SessionStatus {
    let mut skipped = 0_usize;
    let mut failed = 0_usize;

    for (position, unit) in units.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            info!(position, total = units.len(), "playback cancelled");
            return SessionStatus::Cancelled;
        }

        let name = unit.clip_name();
        let Some(clip) = library.get_or_load(name) else {
            warn!(clip = name, position, "clip not found, skipping unit");
            skipped += 1;
            continue;
        };

        if let Err(e) = sink.play(&clip) {
            warn!(clip = name, position, error = %e, "unit playback failed, continuing");
            failed += 1;
        }
    }

    info!(units = units.len(), skipped, failed, "playback finished");
    SessionStatus::Finished
}
