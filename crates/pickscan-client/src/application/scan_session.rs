//! ScanSession: the camera-scan lifecycle state machine.
//!
//! One session owns the camera for the duration of an *activation* (one
//! successful `start()` through to its terminal event) and guarantees the
//! owner observes at most one of: a detected barcode, a timeout, or the
//! start failure itself.
//!
//! ```text
//!           start()              acquired
//!     Idle ────────► Starting ──────────► Scanning ──────────────┐
//!      ▲                │                                        │
//!      │                │ acquisition failed     first decode,   │
//!      │                │                        deadline, or    │
//!      │                ▼                        stop()          ▼
//!      └────────────────┴◄────────────────────────────────── Stopping
//!                               camera released
//! ```
//!
//! The decode engine reports over a channel; [`ScanSession::next_event`]
//! races that channel against the armed scan deadline and resolves the
//! winner into a single [`ScanEvent`]. Stopping closes the channel receiver,
//! so decode events buffered behind the first hit, or arriving after a stop,
//! are discarded by construction rather than filtered case by case.
//!
//! Device work goes through the [`CameraDevice`] trait defined here; the
//! platform implementations (and the test mock) live in the infrastructure
//! layer.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use pickscan_core::ScannerConfig;

/// Capacity of the decode-event channel handed out by [`CameraDevice::open`].
///
/// At the reference decode rate of 10 fps a small buffer absorbs a burst of
/// frame reports without blocking the engine side.
pub const DECODE_CHANNEL_CAPACITY: usize = 32;

/// Per-frame outcome reported by the decode engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent {
    /// The engine decoded barcode text in this frame. The text is raw engine
    /// output; format classification happens at lookup time.
    Decoded(String),
    /// The engine analysed the frame and found nothing. The message is the
    /// engine's own phrasing; most of these are routine and the session
    /// suppresses them.
    NoRead(String),
}

/// Error type for camera acquisition and release.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CameraError {
    /// The user (or platform policy) denied camera access.
    #[error("camera permission denied")]
    PermissionDenied,
    /// No camera matching the request exists on this device.
    #[error("no camera device found")]
    DeviceNotFound,
    /// The camera exists but another application holds it.
    #[error("camera device is busy")]
    DeviceBusy,
    /// Any other platform failure, passed through unclassified.
    #[error("camera failure: {0}")]
    Other(String),
}

/// Platform-agnostic camera plus decode engine.
///
/// A production implementation binds the platform camera API and a barcode
/// decoder in the infrastructure layer; tests inject the mock there.
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Acquires the camera described by `config` and starts the decode
    /// engine, returning the channel the engine reports on.
    ///
    /// The channel stays open until [`CameraDevice::release`] is called or
    /// the engine dies; dropping the receiver tells the engine nobody is
    /// listening any more.
    ///
    /// # Errors
    ///
    /// Returns a classified [`CameraError`]. [`CameraError::Other`] carries
    /// the raw platform message for failure kinds outside the taxonomy.
    async fn open(
        &self,
        config: &ScannerConfig,
    ) -> Result<mpsc::Receiver<DecodeEvent>, CameraError>;

    /// Releases the camera and stops the decode engine.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError`] when the platform reports a release failure.
    /// Callers on recovery paths are expected to log the error and continue.
    async fn release(&self) -> Result<(), CameraError>;
}

/// Engine phrasings for "no barcode in this frame".
///
/// A no-read whose message contains one of these is routine at the
/// configured decode rate and is suppressed; anything else is logged as an
/// engine problem, but never ends the activation.
const EXPECTED_NO_READ_PATTERNS: &[&str] = &[
    "NotFoundException",
    "No MultiFormat Readers were able to detect the code",
    "No barcode or QR code detected",
    "QR code parse error",
];

/// Lifecycle state of a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No activation; the camera is released.
    Idle,
    /// Camera acquisition in progress.
    Starting,
    /// Camera held, decode engine running, deadline armed.
    Scanning,
    /// Camera release in progress; decode events are no longer honoured.
    Stopping,
}

/// Terminal event of one activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// The engine decoded barcode text. This is raw engine output: linear
    /// symbologies such as CODE-128 can produce non-numeric text, so format
    /// classification happens at lookup time, not here.
    BarcodeDetected(String),
    /// The scan deadline elapsed without a decode.
    TimedOut,
}

/// The camera-scan state machine. See the module docs for the lifecycle.
pub struct ScanSession {
    camera: Arc<dyn CameraDevice>,
    config: ScannerConfig,
    state: ScanState,
    decode_rx: Option<mpsc::Receiver<DecodeEvent>>,
    deadline: Option<Instant>,
    activation_id: Option<Uuid>,
}

/// Outcome of one iteration of the `next_event` race.
enum Pump {
    Decoded(String),
    NoRead(String),
    DeadlineElapsed,
    EngineGone,
}

impl ScanSession {
    /// Creates an idle session that will acquire `camera` with `config`.
    pub fn new(camera: Arc<dyn CameraDevice>, config: ScannerConfig) -> Self {
        Self {
            camera,
            config,
            state: ScanState::Idle,
            decode_rx: None,
            deadline: None,
            activation_id: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// `true` while an activation holds the camera and awaits a decode.
    pub fn is_scanning(&self) -> bool {
        self.state == ScanState::Scanning
    }

    /// Starts an activation.
    ///
    /// Returns `Ok(false)` without touching the camera when the session is
    /// not idle; the running activation keeps its camera and its deadline.
    /// On success the camera is held, the scan deadline is armed, and
    /// `Ok(true)` is returned.
    ///
    /// # Errors
    ///
    /// Propagates the classified [`CameraError`] when device acquisition
    /// fails. The session is back in [`ScanState::Idle`] and no scan event
    /// will follow.
    pub async fn start(&mut self) -> Result<bool, CameraError> {
        if self.state != ScanState::Idle {
            debug!(state = ?self.state, "scan start rejected: session not idle");
            return Ok(false);
        }

        let activation_id = Uuid::new_v4();
        self.state = ScanState::Starting;
        debug!(%activation_id, "acquiring camera");

        match self.camera.open(&self.config).await {
            Ok(rx) => {
                self.decode_rx = Some(rx);
                self.deadline = Some(Instant::now() + self.config.scan_timeout);
                self.activation_id = Some(activation_id);
                self.state = ScanState::Scanning;
                info!(
                    %activation_id,
                    timeout = ?self.config.scan_timeout,
                    "scan activation started"
                );
                Ok(true)
            }
            Err(error) => {
                self.state = ScanState::Idle;
                warn!(%activation_id, %error, "camera acquisition failed");
                Err(error)
            }
        }
    }

    /// Stops the current activation and releases the camera.
    ///
    /// No-op when idle or already stopping. Best-effort: a release failure
    /// is logged and swallowed, because stop runs on recovery paths that
    /// must not fail themselves. Never produces a scan event.
    pub async fn stop(&mut self) {
        if matches!(self.state, ScanState::Idle | ScanState::Stopping) {
            return;
        }
        self.state = ScanState::Stopping;
        // Disarm the deadline and close our end of the engine channel.
        // Anything still buffered in it is discarded unseen.
        self.deadline = None;
        self.decode_rx = None;

        if let Err(error) = self.camera.release().await {
            warn!(%error, "camera release failed; continuing");
        }
        if let Some(activation_id) = self.activation_id.take() {
            debug!(%activation_id, "scan activation stopped");
        }
        self.state = ScanState::Idle;
    }

    /// Awaits the terminal event of the current activation.
    ///
    /// Resolves the race between the decode engine and the scan deadline,
    /// performs the internal stop, and hands the single terminal event to
    /// the owner. Returns `None` immediately when nothing is scanning, which
    /// is also why one activation can never produce two terminal events:
    /// resolving the first leaves the session idle.
    pub async fn next_event(&mut self) -> Option<ScanEvent> {
        loop {
            if self.state != ScanState::Scanning {
                return None;
            }
            // Scanning always has an armed deadline.
            let deadline = self.deadline?;

            let step = match self.decode_rx.as_mut() {
                Some(rx) => {
                    tokio::select! {
                        _ = time::sleep_until(deadline) => Pump::DeadlineElapsed,
                        event = rx.recv() => match event {
                            Some(DecodeEvent::Decoded(text)) => Pump::Decoded(text),
                            Some(DecodeEvent::NoRead(message)) => Pump::NoRead(message),
                            None => Pump::EngineGone,
                        },
                    }
                }
                // Engine channel already gone: only the deadline can end
                // this activation now.
                None => {
                    time::sleep_until(deadline).await;
                    Pump::DeadlineElapsed
                }
            };

            match step {
                Pump::Decoded(text) => {
                    if let Some(activation_id) = self.activation_id {
                        info!(%activation_id, barcode = %text, "barcode detected");
                    }
                    self.stop().await;
                    return Some(ScanEvent::BarcodeDetected(text));
                }
                Pump::DeadlineElapsed => {
                    if let Some(activation_id) = self.activation_id {
                        info!(%activation_id, "scan timed out");
                    }
                    self.stop().await;
                    return Some(ScanEvent::TimedOut);
                }
                Pump::NoRead(message) => {
                    // Routine per-frame noise; keep waiting for the deadline.
                    if !is_expected_no_read(&message) {
                        warn!(%message, "decode engine reported an unexpected failure");
                    }
                }
                Pump::EngineGone => {
                    debug!("decode engine channel closed mid-scan; waiting out the deadline");
                    self.decode_rx = None;
                }
            }
        }
    }
}

/// `true` when `message` is a routine "nothing in this frame" notice.
fn is_expected_no_read(message: &str) -> bool {
    EXPECTED_NO_READ_PATTERNS
        .iter()
        .any(|pattern| message.contains(pattern))
}
