//! Mock camera for unit testing.
//!
//! Allows tests to inject synthetic [`DecodeEvent`]s without camera hardware
//! or a real decode engine, and to script acquisition/release failures.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use pickscan_core::ScannerConfig;

use crate::application::scan_session::{
    CameraDevice, CameraError, DecodeEvent, DECODE_CHANNEL_CAPACITY,
};

/// A mock implementation of [`CameraDevice`] driven by the test.
#[derive(Default)]
pub struct MockCamera {
    sender: Mutex<Option<mpsc::Sender<DecodeEvent>>>,
    open_error: Mutex<Option<CameraError>>,
    release_error: Mutex<Option<CameraError>>,
    open_count: Mutex<u32>,
    release_count: Mutex<u32>,
    last_config: Mutex<Option<ScannerConfig>>,
}

impl MockCamera {
    /// Creates a mock camera that opens and releases cleanly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `open` fail with `error`.
    pub fn fail_open_with(&self, error: CameraError) {
        *self.open_error.lock().expect("lock poisoned") = Some(error);
    }

    /// Makes every subsequent `release` fail with `error`.
    pub fn fail_release_with(&self, error: CameraError) {
        *self.release_error.lock().expect("lock poisoned") = Some(error);
    }

    /// Injects a successful decode, as if the engine read `text` off a frame.
    ///
    /// Events injected while the device is closed are dropped, like a real
    /// engine still analysing frames while a release request is in flight.
    pub fn inject_decode(&self, text: &str) {
        self.inject(DecodeEvent::Decoded(text.to_string()));
    }

    /// Injects a per-frame no-read notice with the engine's own message.
    pub fn inject_no_read(&self, message: &str) {
        self.inject(DecodeEvent::NoRead(message.to_string()));
    }

    fn inject(&self, event: DecodeEvent) {
        let guard = self.sender.lock().expect("lock poisoned");
        if let Some(sender) = guard.as_ref() {
            // try_send: discard the event when the channel is closed or full,
            // like an engine racing a release.
            let _ = sender.try_send(event);
        }
    }

    /// Drops the engine channel without a release, as if the decode engine
    /// died mid-scan while the camera stayed open.
    pub fn disconnect_engine(&self) {
        *self.sender.lock().expect("lock poisoned") = None;
    }

    /// Number of successful `open` calls.
    pub fn open_count(&self) -> u32 {
        *self.open_count.lock().expect("lock poisoned")
    }

    /// Number of `release` calls, counting failed ones.
    pub fn release_count(&self) -> u32 {
        *self.release_count.lock().expect("lock poisoned")
    }

    /// The configuration passed to the most recent `open`.
    pub fn last_config(&self) -> Option<ScannerConfig> {
        self.last_config.lock().expect("lock poisoned").clone()
    }

    /// Whether the device currently holds an open engine channel.
    pub fn is_open(&self) -> bool {
        self.sender.lock().expect("lock poisoned").is_some()
    }
}

#[async_trait]
impl CameraDevice for MockCamera {
    async fn open(
        &self,
        config: &ScannerConfig,
    ) -> Result<mpsc::Receiver<DecodeEvent>, CameraError> {
        if let Some(error) = self.open_error.lock().expect("lock poisoned").clone() {
            return Err(error);
        }
        *self.last_config.lock().expect("lock poisoned") = Some(config.clone());
        *self.open_count.lock().expect("lock poisoned") += 1;
        let (tx, rx) = mpsc::channel(DECODE_CHANNEL_CAPACITY);
        *self.sender.lock().expect("lock poisoned") = Some(tx);
        Ok(rx)
    }

    async fn release(&self) -> Result<(), CameraError> {
        // Drop the sender to close the engine channel
        *self.sender.lock().expect("lock poisoned") = None;
        *self.release_count.lock().expect("lock poisoned") += 1;
        if let Some(error) = self.release_error.lock().expect("lock poisoned").clone() {
            return Err(error);
        }
        Ok(())
    }
}
