//! Per-request span and access log.
//!
//! Opens a `request` span carrying `trace_id`, `method` and `path`, instruments
//! the downstream future with it, and emits one `request_completed` event when
//! the response is ready. Level follows the status class.
//!
//! Wire it inside `RequestTrace` so the trace id is already in extensions:
//!
//! App::new()
//!     .wrap(AccessLog)
//!     .wrap(RequestTrace)
//!
//! Headers are never logged; the authenticated subject is logged masked.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, info_span, warn, Instrument};

use crate::auth::claims::Claims;
use crate::logging::pii::mask_identity;

#[derive(Clone, Default)]
pub struct AccessLog;

impl<S, B> Transform<S, ServiceRequest> for AccessLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessLogMiddleware { service }))
    }
}

pub struct AccessLogMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AccessLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let span = info_span!("request", trace_id = %trace_id, method = %method, path = %path);
        let fut = span.in_scope(|| self.service.call(req)).instrument(span.clone());

        Box::pin(async move {
            let result = fut.await;

            let (status, subject) = match &result {
                Ok(res) => (
                    res.status(),
                    res.request()
                        .extensions()
                        .get::<Claims>()
                        .map(|c| mask_identity(c.sub())),
                ),
                Err(err) => (err.as_response_error().status_code(), None),
            };

            let _entered = span.enter();
            log_completion(status, start.elapsed().as_micros() as u64, subject.as_deref());

            result
        })
    }
}

fn log_completion(status: StatusCode, duration_us: u64, subject: Option<&str>) {
    let status_code = status.as_u16();
    let subject = subject.unwrap_or("-");

    if status.is_server_error() {
        error!(http.status_code = status_code, duration_us, subject, message = "request_completed");
    } else if status.is_client_error() {
        warn!(http.status_code = status_code, duration_us, subject, message = "request_completed");
    } else {
        info!(http.status_code = status_code, duration_us, subject, message = "request_completed");
    }
}
