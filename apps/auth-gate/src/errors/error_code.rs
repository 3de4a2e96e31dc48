//! Error codes for the auth gate HTTP API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Codes are SCREAMING_SNAKE_CASE and appear verbatim in the `code` field
//! of every error body.

use core::fmt;

/// Centralized, stable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Login
    /// Unknown identity or wrong secret (deliberately indistinguishable)
    InvalidCredentials,

    // Auth gate
    /// No Authorization header on a protected route
    MissingAuth,
    /// Authorization header present but not `Bearer <token>`
    MalformedAuth,
    /// Token could not be parsed
    MalformedToken,
    /// Token expiry is in the past
    TokenExpired,
    /// Token issued-at / not-before is in the future
    TokenNotYetValid,
    /// Signature or algorithm check failed
    TokenInvalid,

    // Authorization policy
    /// Verified caller lacks the role the route requires
    InsufficientRole,

    // Request handling
    /// Request body could not be read
    BadRequest,

    // System
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: [ErrorCode; 11] = [
        Self::InvalidCredentials,
        Self::MissingAuth,
        Self::MalformedAuth,
        Self::MalformedToken,
        Self::TokenExpired,
        Self::TokenNotYetValid,
        Self::TokenInvalid,
        Self::InsufficientRole,
        Self::BadRequest,
        Self::Internal,
        Self::ConfigError,
    ];

    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            Self::MissingAuth => "MISSING_AUTH",
            Self::MalformedAuth => "MALFORMED_AUTH",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenNotYetValid => "TOKEN_NOT_YET_VALID",
            Self::TokenInvalid => "TOKEN_INVALID",

            Self::InsufficientRole => "INSUFFICIENT_ROLE",

            Self::BadRequest => "BAD_REQUEST",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
