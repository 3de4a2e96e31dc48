//! Role policy layered on top of [`CurrentUser`].

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use super::current_user::CurrentUser;
use crate::auth::claims::Role;
use crate::error::AppError;
use crate::logging::security;

/// Caller holding at least `Role::Admin`.
///
/// Fails with `MissingAuth` when no claims are present and with
/// `InsufficientRole` (403) when the caller's role is lower.
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl AdminUser {
    pub const REQUIRED: Role = Role::Admin;
}

/// Admit `user` only if it holds `required` or higher.
pub fn require_role(user: CurrentUser, required: Role) -> Result<CurrentUser, AppError> {
    if user.claims().has_role(required) {
        Ok(user)
    } else {
        security::role_denied(user.sub(), user.role(), required);
        Err(AppError::InsufficientRole)
    }
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let result = CurrentUser::from_request(req, payload)
            .into_inner()
            .and_then(|user| require_role(user, Self::REQUIRED))
            .map(AdminUser);
        ready(result)
    }
}
