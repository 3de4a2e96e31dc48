#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod resources;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::claims::{Claims, Role};
pub use auth::credentials::{CredentialRecord, CredentialStore, InMemoryCredentialStore};
pub use auth::jwt::{mint_token, verify_token, verify_token_at, TokenError};
pub use config::Config;
pub use error::{AppError, ErrorBody};
pub use errors::ErrorCode;
pub use extractors::{AdminUser, CurrentUser};
pub use middleware::auth_gate::{authenticate, AuthGate, GateRejection};
pub use middleware::{AccessLog, RequestTrace};
pub use services::login::{LoginError, LoginService};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
