//! Username/secret login that mints a bearer token.

use std::sync::Arc;
use std::time::SystemTime;

use thiserror::Error;
use tracing::debug;

use crate::auth::claims::Claims;
use crate::auth::credentials::{CredentialStore, UNKNOWN_IDENTITY};
use crate::auth::jwt::mint_token;
use crate::error::AppError;
use crate::logging::security;
use crate::state::security_config::SecurityConfig;

#[derive(Debug, Error)]
pub enum LoginError {
    /// Unknown identity and wrong secret are reported identically.
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("token issuance failed: {0}")]
    Issue(String),
}

impl From<LoginError> for AppError {
    fn from(e: LoginError) -> Self {
        match e {
            LoginError::InvalidCredentials => AppError::InvalidCredentials,
            LoginError::Issue(detail) => AppError::internal(detail),
        }
    }
}

/// Stateless: holds only the read-only store and signing config.
#[derive(Clone)]
pub struct LoginService {
    credentials: Arc<dyn CredentialStore>,
    security: SecurityConfig,
}

impl LoginService {
    pub fn new(credentials: Arc<dyn CredentialStore>, security: SecurityConfig) -> Self {
        Self {
            credentials,
            security,
        }
    }

    /// Check `identity`/`secret` and return a signed token issued at `now`.
    pub fn login(
        &self,
        identity: &str,
        secret: &str,
        now: SystemTime,
    ) -> Result<String, LoginError> {
        let record = match self.credentials.lookup(identity) {
            Some(record) => record,
            None => {
                // Burn the same comparison an existing identity would cost.
                std::hint::black_box(UNKNOWN_IDENTITY.secret_matches(secret));
                security::login_failed("unknown_identity", identity);
                return Err(LoginError::InvalidCredentials);
            }
        };

        if !record.secret_matches(secret) {
            security::login_failed("secret_mismatch", identity);
            return Err(LoginError::InvalidCredentials);
        }

        let claims = Claims::issue(
            record.identity(),
            record.role(),
            now,
            self.security.token_ttl(),
        )
        .map_err(|e| LoginError::Issue(format!("failed to build claims: {e}")))?;

        let token = mint_token(&claims, &self.security)
            .map_err(|e| LoginError::Issue(e.to_string()))?;

        debug!(role = %claims.role(), exp = claims.exp(), "token issued");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::auth::claims::Role;
    use crate::auth::credentials::{CredentialRecord, InMemoryCredentialStore};
    use crate::auth::jwt::verify_token_at;

    fn service() -> LoginService {
        let store = InMemoryCredentialStore::from_records([
            CredentialRecord::new("admin", "adminpass", Role::Admin),
            CredentialRecord::new("user1", "userpass", Role::User),
        ]);
        let security = SecurityConfig::new("login-test-secret".as_bytes()).unwrap();
        LoginService::new(Arc::new(store), security)
    }

    #[test]
    fn test_login_issues_verifiable_token_with_record_role() {
        let service = service();
        let now = SystemTime::now();

        for (identity, secret, role) in [
            ("admin", "adminpass", Role::Admin),
            ("user1", "userpass", Role::User),
        ] {
            let token = service.login(identity, secret, now).unwrap();
            let claims = verify_token_at(&token, now, &service.security).unwrap();
            assert_eq!(claims.sub(), identity);
            assert_eq!(claims.role(), role);
            assert_eq!(claims.exp() - claims.iat(), 24 * 60 * 60);
        }
    }

    #[test]
    fn test_unknown_and_wrong_secret_are_indistinguishable() {
        let service = service();
        let now = SystemTime::now();

        let unknown = service.login("nobody", "userpass", now).unwrap_err();
        let wrong = service.login("user1", "adminpass", now).unwrap_err();

        assert!(matches!(unknown, LoginError::InvalidCredentials));
        assert!(matches!(wrong, LoginError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[test]
    fn test_ttl_comes_from_config() {
        let store = InMemoryCredentialStore::from_records([CredentialRecord::new(
            "user1",
            "userpass",
            Role::User,
        )]);
        let security = SecurityConfig::new("login-test-secret".as_bytes())
            .unwrap()
            .with_token_ttl(Duration::from_secs(90))
            .unwrap();
        let service = LoginService::new(Arc::new(store), security.clone());

        let now = SystemTime::now();
        let token = service.login("user1", "userpass", now).unwrap();
        let claims = verify_token_at(&token, now, &security).unwrap();
        assert_eq!(claims.exp() - claims.iat(), 90);
    }

    #[test]
    fn test_error_maps_to_app_error() {
        assert!(matches!(
            AppError::from(LoginError::InvalidCredentials),
            AppError::InvalidCredentials
        ));
        assert!(matches!(
            AppError::from(LoginError::Issue("boom".into())),
            AppError::Internal { .. }
        ));
    }
}
