//! # pickscan-core
//!
//! Shared domain library for PickScan: barcode validation, product and
//! nutrition records, the lookup error taxonomy, and scanner tunables.
//!
//! This crate is used by the client application crate. It has zero
//! dependencies on OS APIs, network sockets, or an async runtime, so every
//! rule in it is testable with plain unit tests.
//!
//! # What PickScan is (for beginners)
//!
//! PickScan is the scanning side of a nutrition lookup app: point a camera at
//! a product barcode (or type the digits in) and get the product's per-100 g
//! nutrition back, or a precise reason why not.  This crate is the shared
//! foundation.  It defines:
//!
//! - **`domain`** – The `Barcode` value type (8–13 decimal digits, validated
//!   at construction so invalid values are never passed around) and the
//!   `Product` / `NutritionFacts` records the product service returns.
//!
//! - **`lookup`** – The closed `LookupError` taxonomy.  Every lookup resolves
//!   to either a `Product` or exactly one of these variants, so callers can
//!   match exhaustively and show a precise message.
//!
//! - **`config`** – Plain tunable structs for the camera scanner and the
//!   lookup client.  No global state: the application populates them from its
//!   config file and passes them down.

// Declare the top-level modules.  Rust will look for each in a file or
// subdirectory with the same name (e.g., src/domain/mod.rs).
pub mod config;
pub mod domain;
pub mod lookup;

// Re-export the most-used types at the crate root so callers can write
// `pickscan_core::Barcode` instead of `pickscan_core::domain::barcode::Barcode`.
pub use config::{CameraFacing, LookupConfig, RegionOfInterest, ScannerConfig, Symbology};
pub use domain::barcode::{Barcode, BarcodeError, MAX_DIGITS, MIN_DIGITS};
pub use domain::product::{format_amount, NutritionFacts, Product};
pub use lookup::LookupError;
