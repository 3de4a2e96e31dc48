//! Routes behind the auth gate.

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::auth::claims::Role;
use crate::error::AppError;
use crate::extractors::{AdminUser, CurrentUser};
use crate::middleware::AuthGate;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// What the gate verified about the caller.
#[derive(Debug, Serialize)]
pub struct WhoAmI {
    pub message: String,
    pub sub: String,
    pub role: Role,
    pub exp: i64,
}

async fn protected(user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(WhoAmI {
        message: "Access granted".to_string(),
        sub: user.sub().to_string(),
        role: user.role(),
        exp: user.claims().exp(),
    }))
}

async fn users(
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(app_state.students.all()))
}

async fn admin(AdminUser(user): AdminUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(WhoAmI {
        message: "Welcome, admin".to_string(),
        sub: user.sub().to_string(),
        role: user.role(),
        exp: user.claims().exp(),
    }))
}

/// Every resource here is individually wrapped by an [`AuthGate`].
pub fn configure_routes(cfg: &mut web::ServiceConfig, security: &SecurityConfig) {
    cfg.service(
        web::resource("/protected")
            .wrap(AuthGate::new(security.clone()))
            .route(web::get().to(protected)),
    )
    .service(
        web::resource("/users")
            .wrap(AuthGate::new(security.clone()))
            .route(web::get().to(users)),
    )
    .service(
        web::resource("/admin")
            .wrap(AuthGate::new(security.clone()))
            .route(web::get().to(admin)),
    );
}
