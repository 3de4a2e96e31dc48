//! Error handling for the auth gate.

pub mod error_code;

pub use error_code::ErrorCode;
