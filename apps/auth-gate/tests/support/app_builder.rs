use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use auth_gate::auth::claims::Role;
use auth_gate::auth::credentials::{CredentialRecord, InMemoryCredentialStore};
use auth_gate::middleware::{AccessLog, RequestTrace};
use auth_gate::resources::StudentStore;
use auth_gate::routes;
use auth_gate::state::app_state::AppState;
use auth_gate::state::security_config::SecurityConfig;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Type alias for route configuration functions
type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET).expect("test secret is valid")
}

/// State with the two stock accounts: `admin`/`adminpass` and `user1`/`userpass`.
pub fn test_state() -> AppState {
    test_state_with(test_security())
}

pub fn test_state_with(security: SecurityConfig) -> AppState {
    let credentials = InMemoryCredentialStore::from_records([
        CredentialRecord::new("admin", "adminpass", Role::Admin),
        CredentialRecord::new("user1", "userpass", Role::User),
    ]);
    AppState::new(security, Arc::new(credentials), StudentStore::sample())
}

/// Builder for creating test Actix service instances
pub struct TestAppBuilder {
    state: AppState,
    route_config: Option<RouteConfigFn>,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: None,
        }
    }

    /// Register the same routes `main` does, gated with the state's security config.
    pub fn with_prod_routes(mut self) -> Self {
        let security = self.state.security.clone();
        self.route_config = Some(Box::new(move |cfg: &mut web::ServiceConfig| {
            routes::configure(cfg, &security)
        }) as RouteConfigFn);
        self
    }

    /// Configure the app with custom routes
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Some(Box::new(config_fn) as RouteConfigFn);
        self
    }

    /// Build the service with the production middleware stack.
    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
        let data = web::Data::new(self.state);
        let route_config = self.route_config;

        test::init_service(
            App::new()
                .wrap(AccessLog)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| {
                    if let Some(config_fn) = &route_config {
                        config_fn(cfg);
                    }
                }),
        )
        .await
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
