//! pickscan-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does pickscan-client do? (for beginners)
//!
//! The *client* is the app in the user's hand. The user points the camera
//! at a product barcode (or types the digits), and the app answers with
//! nutrition data for that product, or with a precise reason why it could
//! not.
//!
//! The client application:
//!
//! 1. Acquires the camera and runs the decode engine through the
//!    `CameraDevice` seam, with a 30-second deadline per scan.
//! 2. Resolves each scan activation into exactly one outcome: a decoded
//!    barcode, a timeout, or the start failure itself.
//! 3. Validates barcode candidates (8 to 13 digits) before any network use.
//! 4. Asks the product service for the barcode over HTTP, bounded by a
//!    10-second deadline, and classifies every failure: not found, network,
//!    server fault, or timeout.
//! 5. Drives the view the user sees through the `ViewSurface` seam:
//!    scanner, loading, result, or a recoverable error.

/// Application layer: the scan session and the view controller.
pub mod application;

/// Infrastructure layer: camera implementations, HTTP lookup, storage, and
/// the terminal UI surface.
pub mod infrastructure;
