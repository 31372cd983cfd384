//! Lookup error taxonomy shared by the application and the HTTP client.
//!
//! One lookup resolves to either a `Product` or exactly one of these
//! variants, never an ambiguous in-between and never an automatic retry
//! (retry policy belongs to the caller). The taxonomy is closed on purpose:
//! the view layer matches it exhaustively to choose a user-facing message,
//! so a new failure kind is a compile error at the match site, not a
//! silently generic "something went wrong".

use std::time::Duration;

use thiserror::Error;

use crate::domain::barcode::Barcode;

/// Classified failure of one product lookup.
#[derive(Debug, Error, PartialEq)]
pub enum LookupError {
    /// The candidate failed barcode validation; no request was made.
    #[error("not a well-formed barcode: {candidate:?}")]
    InvalidFormat { candidate: String },

    /// The service answered 404: it has no product for this barcode.
    #[error("no product found for barcode {barcode}")]
    NotFound { barcode: Barcode },

    /// The service could not be reached, answered with an unexpected
    /// non-success status, or sent a success body that does not decode.
    #[error("product lookup failed: {reason}")]
    Network { reason: String },

    /// The service answered with a 5xx status.
    #[error("product service fault (HTTP {status})")]
    ServerFault { status: u16 },

    /// The request ran past the configured deadline.
    #[error("product lookup timed out after {timeout:?}")]
    Timeout { timeout: Duration },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
