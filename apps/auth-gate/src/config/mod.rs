//! Process configuration loaded from environment variables.
//!
//! Every required value is validated here, before the server binds, so a
//! misconfigured process never starts serving.

pub mod credentials;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::auth::credentials::InMemoryCredentialStore;
use crate::error::AppError;
use crate::resources::StudentStore;
use crate::state::app_state::AppState;
use crate::state::security_config::{SecurityConfig, DEFAULT_TOKEN_TTL};

pub use credentials::parse_credentials;

pub const ENV_HOST: &str = "AUTH_GATE_HOST";
pub const ENV_PORT: &str = "AUTH_GATE_PORT";
pub const ENV_JWT_SECRET: &str = "AUTH_GATE_JWT_SECRET";
pub const ENV_JWT_ALGORITHM: &str = "AUTH_GATE_JWT_ALGORITHM";
pub const ENV_TOKEN_TTL_SECS: &str = "AUTH_GATE_TOKEN_TTL_SECS";
pub const ENV_CREDENTIALS: &str = "AUTH_GATE_CREDENTIALS";

/// Minimum accepted length of the signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Security configuration
    pub security: SecurityConfig,

    // Credential records
    pub credentials: InMemoryCredentialStore,
}

impl Config {
    /// Load and validate all configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(ENV_HOST).unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup(ENV_PORT) {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("{ENV_PORT} must be a valid port number, got '{raw}'"))
            })?,
            None => 8080,
        };

        let secret = lookup(ENV_JWT_SECRET)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::config(format!("{ENV_JWT_SECRET} must be set")))?;
        if secret.len() < MIN_SECRET_LEN {
            return Err(AppError::config(format!(
                "{ENV_JWT_SECRET} is too short. It should be at least {MIN_SECRET_LEN} characters."
            )));
        }

        let algorithm = match lookup(ENV_JWT_ALGORITHM).as_deref() {
            None | Some("HS256") => Algorithm::HS256,
            Some("HS384") => Algorithm::HS384,
            Some("HS512") => Algorithm::HS512,
            Some(other) => {
                return Err(AppError::config(format!(
                    "{ENV_JWT_ALGORITHM} must be HS256, HS384 or HS512, got '{other}'"
                )))
            }
        };

        let token_ttl = match lookup(ENV_TOKEN_TTL_SECS) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    AppError::config(format!(
                        "{ENV_TOKEN_TTL_SECS} must be a positive number of seconds, got '{raw}'"
                    ))
                })?,
            None => DEFAULT_TOKEN_TTL,
        };

        let security = SecurityConfig::new(secret)?
            .with_algorithm(algorithm)?
            .with_token_ttl(token_ttl)?;

        let credentials = lookup(ENV_CREDENTIALS)
            .ok_or_else(|| AppError::config(format!("{ENV_CREDENTIALS} must be set")))
            .and_then(|raw| parse_credentials(&raw))?;

        Ok(Config {
            host,
            port,
            security,
            credentials,
        })
    }

    /// Assemble the shared application state.
    pub fn into_state(self) -> AppState {
        AppState::new(
            self.security,
            Arc::new(self.credentials),
            StudentStore::sample(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::auth::credentials::CredentialStore;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            (ENV_JWT_SECRET, SECRET),
            (ENV_CREDENTIALS, "admin:adminpass:admin,user1:userpass:user"),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&minimal())).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.security.algorithm(), Algorithm::HS256);
        assert_eq!(config.security.token_ttl(), DEFAULT_TOKEN_TTL);
        assert!(config.credentials.lookup("user1").is_some());
    }

    #[test]
    fn test_overrides() {
        let mut vars = minimal();
        vars.extend([
            (ENV_HOST, "127.0.0.1"),
            (ENV_PORT, "3001"),
            (ENV_JWT_ALGORITHM, "HS512"),
            (ENV_TOKEN_TTL_SECS, "900"),
        ]);
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3001);
        assert_eq!(config.security.algorithm(), Algorithm::HS512);
        assert_eq!(config.security.token_ttl(), Duration::from_secs(900));
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let vars = [(ENV_CREDENTIALS, "user1:userpass:user")];
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains(ENV_JWT_SECRET));

        let vars = [(ENV_JWT_SECRET, ""), (ENV_CREDENTIALS, "user1:userpass:user")];
        assert!(Config::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn test_short_secret_is_fatal() {
        let vars = [
            (ENV_JWT_SECRET, "superprotectedkey"),
            (ENV_CREDENTIALS, "user1:userpass:user"),
        ];
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_missing_credentials_is_fatal() {
        let vars = [(ENV_JWT_SECRET, SECRET)];
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains(ENV_CREDENTIALS));
    }

    #[test]
    fn test_invalid_values_are_fatal() {
        for (name, value) in [
            (ENV_PORT, "not-a-port"),
            (ENV_PORT, "70000"),
            (ENV_JWT_ALGORITHM, "RS256"),
            (ENV_JWT_ALGORITHM, "none"),
            (ENV_TOKEN_TTL_SECS, "0"),
            (ENV_TOKEN_TTL_SECS, "-5"),
        ] {
            let mut vars = minimal();
            vars.push((name, value));
            assert!(
                matches!(
                    Config::from_lookup(lookup_from(&vars)),
                    Err(AppError::Config { .. })
                ),
                "{name}={value} should be rejected"
            );
        }
    }

    #[test]
    fn test_into_state_wires_stores() {
        let state = Config::from_lookup(lookup_from(&minimal()))
            .unwrap()
            .into_state();
        assert!(state.credentials.lookup("admin").is_some());
        assert_eq!(state.students.len(), 5);
    }
}
