//! Infrastructure layer for the client application.
//!
//! Contains the outward-facing adapters: the camera/decode-engine seam, the
//! HTTP product lookup, configuration storage, and the terminal rendering of
//! views.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `pickscan_core`, but MUST NOT be imported by the `application` layer or
//! the core domain.
//!
//! # Sub-modules
//!
//! - **`camera`** – `MockCamera`, the synthetic implementation of the
//!   application's `CameraDevice` trait, used by tests and this build's
//!   demo binary. A platform implementation would bind the device API and
//!   a barcode decoder here.
//!
//! - **`lookup`** – `HttpLookupClient`, the reqwest-backed implementation of
//!   the application's `ProductLookup` trait.
//!
//! - **`storage`** – TOML config persistence in the platform config
//!   directory.
//!
//! - **`ui_bridge`** – `TerminalSurface`, the stdout implementation of the
//!   application's `ViewSurface` trait.

pub mod camera;
pub mod lookup;
pub mod storage;
pub mod ui_bridge;
