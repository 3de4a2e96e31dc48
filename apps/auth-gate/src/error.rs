use actix_web::error::ResponseError;
use actix_web::http::header;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::errors::ErrorCode;
use crate::trace_ctx;

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    /// Numeric HTTP status, repeated in the body for clients that only see JSON
    pub error_code: u16,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Authorization header required")]
    MissingAuth,
    #[error("Authorization header must be in Bearer format")]
    MalformedAuth,
    #[error("Malformed token")]
    MalformedToken,
    #[error("Token is expired")]
    TokenExpired,
    #[error("Token not yet active")]
    TokenNotYetValid,
    #[error("Invalid token")]
    TokenInvalid,
    #[error("Insufficient role")]
    InsufficientRole,
    #[error("Bad request: {detail}")]
    BadRequest { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AppError::MissingAuth => ErrorCode::MissingAuth,
            AppError::MalformedAuth => ErrorCode::MalformedAuth,
            AppError::MalformedToken => ErrorCode::MalformedToken,
            AppError::TokenExpired => ErrorCode::TokenExpired,
            AppError::TokenNotYetValid => ErrorCode::TokenNotYetValid,
            AppError::TokenInvalid => ErrorCode::TokenInvalid,
            AppError::InsufficientRole => ErrorCode::InsufficientRole,
            AppError::BadRequest { .. } => ErrorCode::BadRequest,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Client-facing message. Internal and config details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest { detail } => detail.clone(),
            AppError::Internal { .. } | AppError::Config { .. } => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials
            | AppError::MissingAuth
            | AppError::MalformedAuth
            | AppError::MalformedToken
            | AppError::TokenExpired
            | AppError::TokenNotYetValid
            | AppError::TokenInvalid => StatusCode::UNAUTHORIZED,
            AppError::InsufficientRole => StatusCode::FORBIDDEN,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } | AppError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(%trace_id, code = %self.code(), error = %self, "request failed");
        }

        let body = ErrorBody {
            message: self.message(),
            error_code: status.as_u16(),
            code: self.code().to_string(),
            trace_id: trace_id.clone(),
        };

        let mut builder = HttpResponse::build(status);
        builder
            .content_type("application/json")
            .insert_header(("x-trace-id", trace_id));
        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        builder.json(body)
    }
}
