//! ViewController: the user-visible state machine over scan and lookup.
//!
//! Owns the [`ViewState`] and sequences the [`ScanSession`] and the
//! [`ProductLookup`] client into the flow the user sees: scanner ready,
//! loading, then a result or a classified error, with retry recovering back
//! to the scanner. This is the only component that decides *which* view and
//! *what message*; the injected [`ViewSurface`] decides how they are drawn.
//!
//! Everything here runs on one logical flow. Scan events, submissions, and
//! retry are processed one at a time by the owner's dispatch loop, so there
//! is never a second lookup racing the first.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use pickscan_core::{Barcode, BarcodeError, LookupError, Product};

use crate::application::scan_session::{CameraError, ScanEvent, ScanSession, ScanState};

/// The one bounded-time product lookup.
///
/// The production implementation is the HTTP client in the infrastructure
/// layer; tests inject scripted outcomes.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Resolves `candidate` to a product, or to exactly one classified
    /// [`LookupError`].
    async fn lookup(&self, candidate: &str) -> Result<Product, LookupError>;
}

/// The collaborator that renders views and messages.
///
/// Implementations draw; they never decide. All calls are fire-and-forget
/// from the controller's point of view.
pub trait ViewSurface: Send + Sync {
    /// Shows the camera/scanner view with the manual-entry field.
    fn show_scanner(&self);
    /// Shows the loading indicator for the candidate being looked up.
    fn show_loading(&self, candidate: &str);
    /// Shows the product result view.
    fn show_product(&self, product: &Product);
    /// Shows the error view with a retry affordance.
    fn show_error(&self, message: &str);
    /// Updates the inline hint under the manual-entry field; `None` clears it.
    fn set_entry_hint(&self, hint: Option<&str>);
    /// Clears the manual-entry field.
    fn clear_entry(&self);
}

/// Which view the user currently sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// The camera/scanner view; also where a live scan runs.
    ScannerReady,
    /// A lookup is in flight.
    Loading,
    /// A product is displayed.
    ResultShown,
    /// A failure message with a retry affordance is displayed.
    ErrorShown,
}

/// Message shown when the scan deadline elapses without a decode.
pub const SCAN_TIMEOUT_MESSAGE: &str =
    "No barcode detected. Hold the code steady in the frame and try again.";

/// Inline hint for a manual-entry field that fails validation.
///
/// An empty field blocks submission but gets no hint; nagging before the
/// user has typed anything helps nobody.
fn entry_hint(error: &BarcodeError) -> Option<&'static str> {
    match error {
        BarcodeError::Empty => None,
        BarcodeError::NonDigit => Some("Barcodes contain digits only."),
        BarcodeError::WrongLength(_) => Some("Barcodes are 8 to 13 digits."),
    }
}

/// User-facing message for a classified lookup failure.
pub fn lookup_failure_message(error: &LookupError) -> String {
    match error {
        LookupError::InvalidFormat { .. } => {
            "That is not a valid product barcode. Enter 8 to 13 digits.".to_string()
        }
        LookupError::NotFound { barcode } => format!(
            "No product found for barcode {barcode}. It may not be in the catalogue yet."
        ),
        LookupError::Network { .. } => {
            "Could not reach the product service. Check your connection and try again."
                .to_string()
        }
        LookupError::ServerFault { .. } => {
            "The product service is having trouble right now. Try again in a moment."
                .to_string()
        }
        LookupError::Timeout { .. } => "The product lookup took too long. Try again.".to_string(),
    }
}

/// User-facing message for a camera failure at scan start.
pub fn camera_failure_message(error: &CameraError) -> String {
    match error {
        CameraError::PermissionDenied => {
            "Camera access was denied. Allow camera access and try again.".to_string()
        }
        CameraError::DeviceNotFound => {
            "No camera was found on this device. You can type the barcode instead.".to_string()
        }
        CameraError::DeviceBusy => {
            "The camera is in use by another application. Close it and try again.".to_string()
        }
        // Unclassified failures surface their raw platform message.
        CameraError::Other(message) => message.clone(),
    }
}

/// The view controller. See the module docs for the flow it owns.
pub struct ViewController {
    state: ViewState,
    session: ScanSession,
    lookup: Arc<dyn ProductLookup>,
    surface: Arc<dyn ViewSurface>,
    manual_entry: String,
    current_product: Option<Product>,
    last_error: Option<String>,
}

impl ViewController {
    /// Creates a controller in [`ViewState::ScannerReady`] over an idle
    /// session. Nothing is rendered until the first operation.
    pub fn new(
        session: ScanSession,
        lookup: Arc<dyn ProductLookup>,
        surface: Arc<dyn ViewSurface>,
    ) -> Self {
        Self {
            state: ViewState::ScannerReady,
            session,
            lookup,
            surface,
            manual_entry: String::new(),
            current_product: None,
            last_error: None,
        }
    }

    /// Which view the user currently sees.
    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Lifecycle state of the underlying scan session.
    pub fn scan_state(&self) -> ScanState {
        self.session.state()
    }

    /// `true` while a scan activation is live. The owner's dispatch loop
    /// uses this to decide whether to poll [`Self::next_scan_event`].
    pub fn is_scanning(&self) -> bool {
        self.session.is_scanning()
    }

    /// The displayed product, while the result view is up.
    pub fn current_product(&self) -> Option<&Product> {
        self.current_product.as_ref()
    }

    /// The displayed failure message, while the error view is up.
    pub fn last_error_message(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Current contents of the manual-entry field.
    pub fn manual_entry(&self) -> &str {
        &self.manual_entry
    }

    /// Starts a camera scan activation.
    ///
    /// Accepted only while the scanner view is up; requests from any other
    /// view are ignored. A start failure lands in the error view with a
    /// message matched to the failure kind.
    pub async fn start_scanning(&mut self) {
        if self.state != ViewState::ScannerReady {
            debug!(state = ?self.state, "scan start ignored outside the scanner view");
            return;
        }
        match self.session.start().await {
            // The scanner view is already up; a live activation changes
            // nothing the user sees until its terminal event.
            Ok(true) => {}
            Ok(false) => debug!("scan start ignored: an activation is already running"),
            Err(error) => self.show_error(camera_failure_message(&error)),
        }
    }

    /// Awaits the terminal event of the current activation; `None` when
    /// nothing is scanning.
    pub async fn next_scan_event(&mut self) -> Option<ScanEvent> {
        self.session.next_event().await
    }

    /// Applies the terminal event of a scan activation.
    pub async fn handle_scan_event(&mut self, event: ScanEvent) {
        match event {
            // Raw engine text goes straight to lookup; the lookup client is
            // the format gate and classifies noise as InvalidFormat.
            ScanEvent::BarcodeDetected(text) => self.begin_lookup(text).await,
            ScanEvent::TimedOut => self.show_error(SCAN_TIMEOUT_MESSAGE.to_string()),
        }
    }

    /// Records the manual-entry field contents and refreshes the live
    /// validation hint.
    pub fn set_manual_entry(&mut self, text: &str) {
        self.manual_entry = text.to_string();
        let hint = match Barcode::parse(&self.manual_entry) {
            Ok(_) => None,
            Err(error) => entry_hint(&error),
        };
        self.surface.set_entry_hint(hint);
    }

    /// Submits the manual-entry field for lookup.
    ///
    /// Blocked while the field is empty or fails validation (the hint from
    /// [`Self::set_manual_entry`] already says why), and ignored outside the
    /// scanner view, in particular while a lookup is already loading. A live
    /// camera activation is stopped first; the typed barcode wins.
    pub async fn submit_manual_entry(&mut self) {
        if self.state != ViewState::ScannerReady {
            debug!(state = ?self.state, "manual submit ignored outside the scanner view");
            return;
        }
        if !Barcode::is_well_formed(&self.manual_entry) {
            debug!("manual submit blocked: field fails validation");
            return;
        }
        self.session.stop().await;
        let candidate = self.manual_entry.trim().to_string();
        self.begin_lookup(candidate).await;
    }

    /// Recovers from the result or error view back to the scanner.
    ///
    /// Clears the manual-entry field, its hint, and the displayed outcome.
    /// The camera is not restarted; the user asks for the next scan.
    pub fn retry(&mut self) {
        if !matches!(self.state, ViewState::ResultShown | ViewState::ErrorShown) {
            debug!(state = ?self.state, "retry ignored");
            return;
        }
        self.manual_entry.clear();
        self.current_product = None;
        self.last_error = None;
        self.surface.clear_entry();
        self.surface.set_entry_hint(None);
        self.state = ViewState::ScannerReady;
        self.surface.show_scanner();
        info!("returned to scanner view");
    }

    /// Reacts to the hosting surface being hidden or shown.
    ///
    /// Hiding while the camera is held releases it proactively so a
    /// backgrounded app cannot sit on the device. No view transition happens
    /// from visibility alone.
    pub async fn handle_visibility_change(&mut self, hidden: bool) {
        if hidden && self.session.is_scanning() {
            info!("surface hidden; releasing the camera");
            self.session.stop().await;
        }
    }

    /// Runs one lookup for `candidate` and lands in the result or error view.
    async fn begin_lookup(&mut self, candidate: String) {
        self.state = ViewState::Loading;
        self.surface.show_loading(&candidate);
        info!(%candidate, "looking up product");

        match self.lookup.lookup(&candidate).await {
            Ok(product) => {
                info!(barcode = %product.barcode, name = %product.name, "product found");
                self.surface.show_product(&product);
                self.current_product = Some(product);
                self.last_error = None;
                self.state = ViewState::ResultShown;
            }
            Err(error) => {
                warn!(%error, "lookup failed");
                self.show_error(lookup_failure_message(&error));
            }
        }
    }

    /// Lands in the error view with `message`.
    fn show_error(&mut self, message: String) {
        self.surface.show_error(&message);
        self.current_product = None;
        self.last_error = Some(message);
        self.state = ViewState::ErrorShown;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::application::scan_session::CameraDevice;
    use crate::infrastructure::camera::mock::MockCamera;
    use pickscan_core::ScannerConfig;

    /// Lookup double that replays scripted outcomes and records candidates.
    #[derive(Default)]
    struct ScriptedLookup {
        responses: Mutex<VecDeque<Result<Product, LookupError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedLookup {
        fn with_response(response: Result<Product, LookupError>) -> Self {
            let lookup = Self::default();
            lookup.push_response(response);
            lookup
        }

        fn push_response(&self, response: Result<Product, LookupError>) {
            self.responses
                .lock()
                .expect("lock poisoned")
                .push_back(response);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("lock poisoned").clone()
        }
    }

    #[async_trait]
    impl ProductLookup for ScriptedLookup {
        async fn lookup(&self, candidate: &str) -> Result<Product, LookupError> {
            self.calls
                .lock()
                .expect("lock poisoned")
                .push(candidate.to_string());
            self.responses
                .lock()
                .expect("lock poisoned")
                .pop_front()
                .unwrap_or_else(|| {
                    Err(LookupError::Network {
                        reason: "no scripted response".to_string(),
                    })
                })
        }
    }

    /// Surface double that records every render call.
    #[derive(Default)]
    struct RecordingSurface {
        views: Mutex<Vec<String>>,
        errors: Mutex<Vec<String>>,
        hints: Mutex<Vec<Option<String>>>,
        cleared_entries: Mutex<u32>,
    }

    impl RecordingSurface {
        fn views(&self) -> Vec<String> {
            self.views.lock().expect("lock poisoned").clone()
        }

        fn errors(&self) -> Vec<String> {
            self.errors.lock().expect("lock poisoned").clone()
        }

        fn hints(&self) -> Vec<Option<String>> {
            self.hints.lock().expect("lock poisoned").clone()
        }

        fn cleared_entries(&self) -> u32 {
            *self.cleared_entries.lock().expect("lock poisoned")
        }
    }

    impl ViewSurface for RecordingSurface {
        fn show_scanner(&self) {
            self.views.lock().expect("lock poisoned").push("scanner".to_string());
        }

        fn show_loading(&self, candidate: &str) {
            self.views
                .lock()
                .expect("lock poisoned")
                .push(format!("loading:{candidate}"));
        }

        fn show_product(&self, product: &Product) {
            self.views
                .lock()
                .expect("lock poisoned")
                .push(format!("product:{}", product.name));
        }

        fn show_error(&self, message: &str) {
            self.views.lock().expect("lock poisoned").push("error".to_string());
            self.errors
                .lock()
                .expect("lock poisoned")
                .push(message.to_string());
        }

        fn set_entry_hint(&self, hint: Option<&str>) {
            self.hints
                .lock()
                .expect("lock poisoned")
                .push(hint.map(str::to_string));
        }

        fn clear_entry(&self) {
            *self.cleared_entries.lock().expect("lock poisoned") += 1;
        }
    }

    fn sample_product() -> Product {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "barcode": "3017620422003",
            "name": "Nutella",
            "brand": "Ferrero"
        }))
        .expect("sample product body should deserialize")
    }

    fn make_controller(
        lookup: ScriptedLookup,
    ) -> (
        ViewController,
        Arc<MockCamera>,
        Arc<ScriptedLookup>,
        Arc<RecordingSurface>,
    ) {
        let camera = Arc::new(MockCamera::new());
        let session = ScanSession::new(
            Arc::clone(&camera) as Arc<dyn CameraDevice>,
            ScannerConfig::default(),
        );
        let lookup = Arc::new(lookup);
        let surface = Arc::new(RecordingSurface::default());
        let controller = ViewController::new(
            session,
            Arc::clone(&lookup) as Arc<dyn ProductLookup>,
            Arc::clone(&surface) as Arc<dyn ViewSurface>,
        );
        (controller, camera, lookup, surface)
    }

    #[tokio::test]
    async fn test_detected_barcode_drives_loading_then_result() {
        // Arrange
        let (mut controller, camera, lookup, surface) =
            make_controller(ScriptedLookup::with_response(Ok(sample_product())));
        controller.start_scanning().await;
        camera.inject_decode("3017620422003");

        // Act
        let event = controller
            .next_scan_event()
            .await
            .expect("scan should produce an event");
        controller.handle_scan_event(event).await;

        // Assert
        assert_eq!(controller.state(), ViewState::ResultShown);
        assert_eq!(lookup.calls(), vec!["3017620422003".to_string()]);
        assert_eq!(
            surface.views(),
            vec!["loading:3017620422003".to_string(), "product:Nutella".to_string()]
        );
        assert_eq!(
            controller.current_product().map(|p| p.name.as_str()),
            Some("Nutella")
        );
    }

    #[tokio::test]
    async fn test_not_found_lands_in_error_view() {
        // Arrange
        let (mut controller, camera, _lookup, surface) =
            make_controller(ScriptedLookup::with_response(Err(LookupError::NotFound {
                barcode: Barcode::parse("40084015").expect("valid barcode"),
            })));
        controller.start_scanning().await;
        camera.inject_decode("40084015");

        // Act
        let event = controller
            .next_scan_event()
            .await
            .expect("scan should produce an event");
        controller.handle_scan_event(event).await;

        // Assert
        assert_eq!(controller.state(), ViewState::ErrorShown);
        let errors = surface.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("No product found for barcode 40084015"));
        assert!(controller.current_product().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scan_timeout_shows_timeout_message() {
        // Arrange
        let (mut controller, camera, lookup, _surface) =
            make_controller(ScriptedLookup::default());
        controller.start_scanning().await;

        // Act: nothing decodes; the paused clock runs out the deadline
        let event = controller
            .next_scan_event()
            .await
            .expect("timeout should produce an event");
        controller.handle_scan_event(event).await;

        // Assert
        assert_eq!(controller.state(), ViewState::ErrorShown);
        assert_eq!(controller.last_error_message(), Some(SCAN_TIMEOUT_MESSAGE));
        assert_eq!(controller.scan_state(), ScanState::Idle);
        assert_eq!(camera.release_count(), 1);
        assert!(lookup.calls().is_empty());
    }

    #[tokio::test]
    async fn test_camera_failure_kinds_map_to_distinct_messages() {
        // Arrange
        let (mut controller_denied, camera_denied, _, surface_denied) =
            make_controller(ScriptedLookup::default());
        camera_denied.fail_open_with(CameraError::PermissionDenied);
        let (mut controller_busy, camera_busy, _, surface_busy) =
            make_controller(ScriptedLookup::default());
        camera_busy.fail_open_with(CameraError::DeviceBusy);

        // Act
        controller_denied.start_scanning().await;
        controller_busy.start_scanning().await;

        // Assert
        assert_eq!(controller_denied.state(), ViewState::ErrorShown);
        assert_eq!(controller_busy.state(), ViewState::ErrorShown);
        let denied = surface_denied.errors();
        let busy = surface_busy.errors();
        assert!(denied[0].contains("access was denied"));
        assert!(busy[0].contains("in use by another application"));
        assert_ne!(denied[0], busy[0]);
    }

    #[tokio::test]
    async fn test_unclassified_camera_failure_shows_raw_message() {
        // Arrange
        let (mut controller, camera, _, _surface) = make_controller(ScriptedLookup::default());
        camera.fail_open_with(CameraError::Other("sensor reported EIO".to_string()));

        // Act
        controller.start_scanning().await;

        // Assert
        assert_eq!(controller.last_error_message(), Some("sensor reported EIO"));
    }

    #[tokio::test]
    async fn test_detected_noise_text_is_classified_by_the_lookup() {
        // Arrange: a CODE-128 read can hand back non-numeric text
        let (mut controller, camera, lookup, _surface) = make_controller(
            ScriptedLookup::with_response(Err(LookupError::InvalidFormat {
                candidate: "abc123".to_string(),
            })),
        );
        controller.start_scanning().await;
        camera.inject_decode("abc123");

        // Act
        let event = controller
            .next_scan_event()
            .await
            .expect("scan should produce an event");
        controller.handle_scan_event(event).await;

        // Assert
        assert_eq!(lookup.calls(), vec!["abc123".to_string()]);
        assert_eq!(controller.state(), ViewState::ErrorShown);
        assert_eq!(
            controller.last_error_message(),
            Some("That is not a valid product barcode. Enter 8 to 13 digits.")
        );
    }

    #[tokio::test]
    async fn test_manual_entry_hint_follows_field_contents() {
        // Arrange
        let (mut controller, _camera, _lookup, surface) =
            make_controller(ScriptedLookup::default());

        // Act
        controller.set_manual_entry("abc");
        controller.set_manual_entry("301762");
        controller.set_manual_entry("3017620422003");
        controller.set_manual_entry("");

        // Assert
        assert_eq!(
            surface.hints(),
            vec![
                Some("Barcodes contain digits only.".to_string()),
                Some("Barcodes are 8 to 13 digits.".to_string()),
                None,
                None,
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_is_blocked_until_the_field_is_valid() {
        // Arrange
        let (mut controller, _camera, lookup, _surface) =
            make_controller(ScriptedLookup::with_response(Ok(sample_product())));

        // Act
        controller.submit_manual_entry().await;
        controller.set_manual_entry("301762");
        controller.submit_manual_entry().await;

        // Assert: empty and short entries never reach the lookup
        assert!(lookup.calls().is_empty());
        assert_eq!(controller.state(), ViewState::ScannerReady);
    }

    #[tokio::test]
    async fn test_valid_submission_is_trimmed_and_looked_up() {
        // Arrange
        let (mut controller, _camera, lookup, _surface) =
            make_controller(ScriptedLookup::with_response(Ok(sample_product())));

        // Act
        controller.set_manual_entry("  3017620422003  ");
        controller.submit_manual_entry().await;

        // Assert
        assert_eq!(lookup.calls(), vec!["3017620422003".to_string()]);
        assert_eq!(controller.state(), ViewState::ResultShown);
    }

    #[tokio::test]
    async fn test_submit_is_ignored_outside_the_scanner_view() {
        // Arrange: land in the result view first
        let (mut controller, _camera, lookup, _surface) =
            make_controller(ScriptedLookup::with_response(Ok(sample_product())));
        controller.set_manual_entry("3017620422003");
        controller.submit_manual_entry().await;
        assert_eq!(controller.state(), ViewState::ResultShown);

        // Act
        controller.set_manual_entry("40084015");
        controller.submit_manual_entry().await;

        // Assert: still one lookup, view unchanged
        assert_eq!(lookup.calls().len(), 1);
        assert_eq!(controller.state(), ViewState::ResultShown);
    }

    #[tokio::test]
    async fn test_manual_submit_stops_a_live_scan() {
        // Arrange
        let (mut controller, camera, lookup, _surface) =
            make_controller(ScriptedLookup::with_response(Ok(sample_product())));
        controller.start_scanning().await;
        assert!(controller.is_scanning());

        // Act: the typed barcode wins over the camera
        controller.set_manual_entry("3017620422003");
        controller.submit_manual_entry().await;

        // Assert
        assert_eq!(camera.release_count(), 1);
        assert_eq!(controller.scan_state(), ScanState::Idle);
        assert_eq!(lookup.calls(), vec!["3017620422003".to_string()]);
        assert_eq!(controller.state(), ViewState::ResultShown);
    }

    #[tokio::test]
    async fn test_retry_from_error_clears_entry_and_returns_to_scanner() {
        // Arrange
        let (mut controller, _camera, _lookup, surface) =
            make_controller(ScriptedLookup::with_response(Err(LookupError::Network {
                reason: "connection reset".to_string(),
            })));
        controller.set_manual_entry("3017620422003");
        controller.submit_manual_entry().await;
        assert_eq!(controller.state(), ViewState::ErrorShown);

        // Act
        controller.retry();

        // Assert
        assert_eq!(controller.state(), ViewState::ScannerReady);
        assert_eq!(controller.manual_entry(), "");
        assert!(controller.last_error_message().is_none());
        assert_eq!(surface.cleared_entries(), 1);
        assert_eq!(surface.hints().last(), Some(&None));
        assert_eq!(surface.views().last(), Some(&"scanner".to_string()));
    }

    #[tokio::test]
    async fn test_retry_from_result_discards_the_product() {
        // Arrange
        let (mut controller, _camera, _lookup, _surface) =
            make_controller(ScriptedLookup::with_response(Ok(sample_product())));
        controller.set_manual_entry("3017620422003");
        controller.submit_manual_entry().await;
        assert!(controller.current_product().is_some());

        // Act
        controller.retry();

        // Assert
        assert_eq!(controller.state(), ViewState::ScannerReady);
        assert!(controller.current_product().is_none());
    }

    #[tokio::test]
    async fn test_retry_is_ignored_in_the_scanner_view() {
        // Arrange
        let (mut controller, _camera, _lookup, surface) =
            make_controller(ScriptedLookup::default());

        // Act
        controller.retry();

        // Assert: no render happened
        assert!(surface.views().is_empty());
        assert_eq!(controller.state(), ViewState::ScannerReady);
    }

    #[tokio::test]
    async fn test_hiding_the_surface_releases_the_camera_without_view_change() {
        // Arrange
        let (mut controller, camera, _lookup, surface) =
            make_controller(ScriptedLookup::default());
        controller.start_scanning().await;
        assert!(controller.is_scanning());

        // Act
        controller.handle_visibility_change(true).await;

        // Assert
        assert_eq!(camera.release_count(), 1);
        assert_eq!(controller.scan_state(), ScanState::Idle);
        assert_eq!(controller.state(), ViewState::ScannerReady);
        assert!(surface.errors().is_empty());
    }

    #[tokio::test]
    async fn test_visibility_changes_while_idle_are_noops() {
        // Arrange
        let (mut controller, camera, _lookup, _surface) =
            make_controller(ScriptedLookup::default());

        // Act
        controller.handle_visibility_change(true).await;
        controller.handle_visibility_change(false).await;

        // Assert
        assert_eq!(camera.release_count(), 0);
        assert_eq!(controller.state(), ViewState::ScannerReady);
    }

    #[tokio::test]
    async fn test_transport_failure_kinds_map_to_distinct_messages() {
        // Arrange
        let lookup = ScriptedLookup::default();
        lookup.push_response(Err(LookupError::ServerFault { status: 503 }));
        lookup.push_response(Err(LookupError::Network {
            reason: "dns failure".to_string(),
        }));
        lookup.push_response(Err(LookupError::Timeout {
            timeout: std::time::Duration::from_secs(10),
        }));
        let (mut controller, _camera, _lookup, surface) = make_controller(lookup);

        // Act: three submissions, each recovering via retry
        for _ in 0..3 {
            controller.set_manual_entry("3017620422003");
            controller.submit_manual_entry().await;
            assert_eq!(controller.state(), ViewState::ErrorShown);
            controller.retry();
        }

        // Assert
        let errors = surface.errors();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("service is having trouble"));
        assert!(errors[1].contains("Could not reach the product service"));
        assert!(errors[2].contains("took too long"));
        assert_ne!(errors[0], errors[1]);
        assert_ne!(errors[1], errors[2]);
    }

    #[tokio::test]
    async fn test_start_scanning_is_ignored_outside_the_scanner_view() {
        // Arrange: land in the result view
        let (mut controller, camera, _lookup, _surface) =
            make_controller(ScriptedLookup::with_response(Ok(sample_product())));
        controller.set_manual_entry("3017620422003");
        controller.submit_manual_entry().await;
        assert_eq!(controller.state(), ViewState::ResultShown);

        // Act
        controller.start_scanning().await;

        // Assert: no camera acquisition from the result view
        assert_eq!(camera.open_count(), 0);
        assert_eq!(controller.state(), ViewState::ResultShown);
    }
}
