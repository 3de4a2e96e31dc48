//! Error body test helpers
//!
//! Asserts the stable error contract of the service without depending on
//! the service's own types.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderMap, CONTENT_TYPE, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Local mirror of the service's error body.
#[derive(Debug, Deserialize)]
pub struct ErrorBodyLike {
    pub message: String,
    pub error_code: u16,
    pub code: String,
    pub trace_id: String,
}

/// Assert that response parts conform to the stable error contract.
///
/// Checks:
/// - HTTP status and the numeric `error_code` both equal `expected_status`
/// - `code` equals `expected_code`
/// - the body `trace_id` equals the `x-trace-id` header
/// - 401 responses carry `WWW-Authenticate: Bearer`
pub fn assert_error_body_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body_bytes: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
) -> ErrorBodyLike {
    assert_eq!(status, expected_status);

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/json"),
        "Content-Type must be application/json (got {content_type})"
    );

    let body: ErrorBodyLike =
        serde_json::from_slice(body_bytes).expect("Response body should be a valid error body");

    let trace_id_header = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    assert_eq!(
        body.trace_id, trace_id_header,
        "trace_id in body should match x-trace-id header"
    );

    assert_eq!(body.code, expected_code);
    assert_eq!(body.error_code, expected_status.as_u16());
    assert!(!body.message.is_empty(), "message should not be empty");

    if expected_status == StatusCode::UNAUTHORIZED {
        let challenge = headers
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .expect("401 responses must carry WWW-Authenticate");
        assert_eq!(challenge, "Bearer");
    }

    body
}

/// Assert that a ServiceResponse conforms to the stable error contract.
pub async fn assert_error_body(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
) -> ErrorBodyLike {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_error_body_from_parts(status, &headers, &body, expected_status, expected_code)
}
