use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::claims::{Claims, Role};
use crate::error::AppError;

/// Verified claims of the caller, as admitted by `AuthGate`.
///
/// Only valid on routes wrapped by the gate; elsewhere extraction fails with
/// `MissingAuth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub Claims);

impl CurrentUser {
    pub fn sub(&self) -> &str {
        self.0.sub()
    }

    pub fn role(&self) -> Role {
        self.0.role()
    }

    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Claims>()
                .cloned()
                .map(CurrentUser)
                .ok_or(AppError::MissingAuth),
        )
    }
}
