//! Claims carried inside issued tokens.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of roles. Ordering is privilege: `User < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ClaimsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(ClaimsError::UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimsError {
    #[error("subject must not be empty")]
    EmptySubject,
    #[error("expiry must be after issued-at")]
    InvalidWindow,
    #[error("clock is before the Unix epoch")]
    ClockBeforeEpoch,
    #[error("unknown role '{0}'")]
    UnknownRole(String),
}

/// Token payload. Timestamps are seconds since the Unix epoch.
///
/// Invariants: `sub` is non-empty and `exp > iat`. Values are only built by
/// [`Claims::issue`] or by decoding a verified token, which re-checks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    sub: String,
    role: Role,
    iat: i64,
    exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nbf: Option<i64>,
}

impl Claims {
    /// Claims for `sub` issued at `now`, valid for `ttl`.
    pub fn issue(
        sub: impl Into<String>,
        role: Role,
        now: SystemTime,
        ttl: Duration,
    ) -> Result<Self, ClaimsError> {
        let iat = unix_seconds(now)?;
        let exp = iat.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX));

        let claims = Self {
            sub: sub.into(),
            role,
            iat,
            exp,
            nbf: None,
        };
        claims.validate()?;
        Ok(claims)
    }

    /// Restrict use until `nbf` (seconds since epoch).
    pub fn with_not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    pub fn validate(&self) -> Result<(), ClaimsError> {
        if self.sub.is_empty() {
            return Err(ClaimsError::EmptySubject);
        }
        if self.exp <= self.iat {
            return Err(ClaimsError::InvalidWindow);
        }
        Ok(())
    }

    pub fn sub(&self) -> &str {
        &self.sub
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn iat(&self) -> i64 {
        self.iat
    }

    pub fn exp(&self) -> i64 {
        self.exp
    }

    pub fn nbf(&self) -> Option<i64> {
        self.nbf
    }

    /// True when the caller holds at least `min`.
    pub fn has_role(&self, min: Role) -> bool {
        self.role >= min
    }
}

pub(crate) fn unix_seconds(at: SystemTime) -> Result<i64, ClaimsError> {
    at.duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .map_err(|_| ClaimsError::ClockBeforeEpoch)
}
