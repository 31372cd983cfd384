//! Storage adapters for the client application.
//!
//! Currently holds the TOML configuration persistence. Scan history and
//! other on-device state would live here too.

pub mod config;
