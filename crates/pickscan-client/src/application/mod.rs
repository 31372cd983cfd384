//! Application layer use cases for the client.
//!
//! # What use cases does the client have?
//!
//! - **`scan_session`** – Owns one camera activation at a time: acquires the
//!   device through the injected `CameraDevice`, races the decode engine
//!   against the scan deadline, and resolves each activation into exactly
//!   one terminal event.
//!
//! - **`view_controller`** – Owns the view state the user sees. Sequences
//!   the scan session and the `ProductLookup` client into scanner, loading,
//!   result, and error views, and handles manual entry, retry, and
//!   visibility changes.

pub mod scan_session;
pub mod view_controller;
