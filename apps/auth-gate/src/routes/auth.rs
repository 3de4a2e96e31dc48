use std::time::SystemTime;

use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "username")]
    pub identity: String,
    #[serde(alias = "password")]
    pub secret: String,
}

// Manual impl so the secret never reaches a log line.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Exchange an identity/secret pair for a bearer token.
async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { identity, secret } = req.into_inner();

    let token = app_state
        .login_service()
        .login(&identity, &secret, SystemTime::now())?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

// The serde message can quote body values, so it is not echoed back.
fn login_body_error(_err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request("Request body must be JSON with identity and secret").into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/login")
            .app_data(web::JsonConfig::default().error_handler(login_body_error))
            .route(web::post().to(login)),
    );
}
