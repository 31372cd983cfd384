//! Camera and decode-engine implementations.
//!
//! The `CameraDevice` trait itself lives in the application layer next to
//! the scan session that drives it; this module holds the implementations.
//! A production build would bind the platform camera API and a barcode
//! decoder here, selected with `#[cfg(target_os = ...)]`.

pub mod mock;
