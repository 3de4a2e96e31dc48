//! Bearer-token gate for protected routes.
//!
//! [`authenticate`] is the whole decision: extract the bearer token, verify
//! it, and either hand back the claims or a [`GateRejection`]. [`AuthGate`]
//! wraps a service with that decision. Admitted requests carry their
//! [`Claims`] in request extensions; rejected requests get an error response
//! rendered here and never reach the wrapped service.
//!
//! Role checks are a separate layer (see `extractors::require_role`).

use std::time::SystemTime;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::claims::Claims;
use crate::auth::jwt::{verify_token_at, TokenError};
use crate::error::AppError;
use crate::logging::security;
use crate::state::security_config::SecurityConfig;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GateRejection {
    #[error("no Authorization header")]
    MissingAuth,
    #[error("Authorization header is not a bearer credential")]
    MalformedAuth,
    #[error("token is malformed")]
    MalformedToken,
    #[error("token has expired")]
    TokenExpired,
    #[error("token is not yet valid")]
    TokenNotYetValid,
    #[error("token failed verification")]
    TokenInvalid,
}

impl GateRejection {
    /// Stable label for security logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            GateRejection::MissingAuth => "missing_auth",
            GateRejection::MalformedAuth => "malformed_auth",
            GateRejection::MalformedToken => "malformed_token",
            GateRejection::TokenExpired => "token_expired",
            GateRejection::TokenNotYetValid => "token_not_yet_valid",
            GateRejection::TokenInvalid => "token_invalid",
        }
    }
}

impl From<TokenError> for GateRejection {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Malformed => GateRejection::MalformedToken,
            TokenError::Expired => GateRejection::TokenExpired,
            TokenError::NotYetValid => GateRejection::TokenNotYetValid,
            TokenError::SignatureInvalid => GateRejection::TokenInvalid,
        }
    }
}

impl From<GateRejection> for AppError {
    fn from(r: GateRejection) -> Self {
        match r {
            GateRejection::MissingAuth => AppError::MissingAuth,
            GateRejection::MalformedAuth => AppError::MalformedAuth,
            GateRejection::MalformedToken => AppError::MalformedToken,
            GateRejection::TokenExpired => AppError::TokenExpired,
            GateRejection::TokenNotYetValid => AppError::TokenNotYetValid,
            GateRejection::TokenInvalid => AppError::TokenInvalid,
        }
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn extract_bearer(header_value: Option<&HeaderValue>) -> Result<&str, GateRejection> {
    let value = header_value.ok_or(GateRejection::MissingAuth)?;
    let value = value.to_str().map_err(|_| GateRejection::MalformedAuth)?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(GateRejection::MalformedAuth)?;
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(GateRejection::MalformedAuth);
    }

    Ok(token)
}

/// Decide whether a request carrying `header_value` is admitted at `now`.
pub fn authenticate(
    header_value: Option<&HeaderValue>,
    security: &SecurityConfig,
    now: SystemTime,
) -> Result<Claims, GateRejection> {
    let token = extract_bearer(header_value)?;
    verify_token_at(token, now, security).map_err(GateRejection::from)
}

/// Middleware admitting only requests with a valid bearer token.
#[derive(Clone)]
pub struct AuthGate {
    security: SecurityConfig,
}

impl AuthGate {
    pub fn new(security: SecurityConfig) -> Self {
        Self { security }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service,
            security: self.security.clone(),
        }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: S,
    security: SecurityConfig,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let decision = authenticate(
            req.headers().get(header::AUTHORIZATION),
            &self.security,
            SystemTime::now(),
        );

        match decision {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(rejection) => {
                security::token_rejected(rejection.as_str(), req.path());
                let err = AppError::from(rejection);
                Box::pin(async move { Ok(req.error_response(err).map_into_right_body()) })
            }
        }
    }
}
