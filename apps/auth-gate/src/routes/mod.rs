use actix_web::web;

use crate::state::security_config::SecurityConfig;

pub mod auth;
pub mod health;
pub mod protected;

/// Register every route. Protected resources are wrapped with an
/// `AuthGate` built from `security`; `/login` and `/health` are public.
pub fn configure(cfg: &mut web::ServiceConfig, security: &SecurityConfig) {
    health::configure_routes(cfg);
    auth::configure_routes(cfg);
    protected::configure_routes(cfg, security);
}
