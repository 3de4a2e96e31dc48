use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::error::AppError;

/// Default lifetime of an issued token.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Signing configuration shared by the login service and the auth gate.
///
/// Built once at startup and never mutated. There is no default: a
/// `SecurityConfig` only exists if a non-empty secret was supplied.
#[derive(Clone)]
pub struct SecurityConfig {
    jwt_secret: Arc<[u8]>,
    algorithm: Algorithm,
    token_ttl: Duration,
}

impl SecurityConfig {
    /// Create a HS256 config with the default 24h TTL.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Result<Self, AppError> {
        let jwt_secret: Vec<u8> = jwt_secret.into();
        if jwt_secret.is_empty() {
            return Err(AppError::config("JWT signing secret must not be empty"));
        }

        Ok(Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
        })
    }

    /// Pin a different HMAC algorithm. Anything outside the HS family is refused.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Result<Self, AppError> {
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AppError::config(format!(
                "JWT algorithm must be HS256, HS384 or HS512, got {algorithm:?}"
            )));
        }
        self.algorithm = algorithm;
        Ok(self)
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Result<Self, AppError> {
        if token_ttl.is_zero() {
            return Err(AppError::config("token TTL must be greater than zero"));
        }
        self.token_ttl = token_ttl;
        Ok(self)
    }

    pub fn jwt_secret(&self) -> &[u8] {
        &self.jwt_secret
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}

// Keeps the secret out of logs and panic messages.
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
