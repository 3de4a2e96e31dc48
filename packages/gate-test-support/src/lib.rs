//! Test support utilities for the auth gate service
//!
//! This crate provides helpers shared by the integration test binaries:
//! unified logging initialization and assertions over the JSON error body.

pub mod error_body;
pub mod logging;
