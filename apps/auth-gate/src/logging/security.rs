//! Security-relevant warn events. Never pass secrets or raw tokens here.

use tracing::warn;

use crate::auth::claims::Role;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a failed login attempt.
pub fn login_failed(reason: &str, identity: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        identity = %Redacted(identity),
        reason,
        "Authentication failure"
    );
}

/// Log a request turned away by the auth gate.
pub fn token_rejected(reason: &str, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        path,
        reason,
        "Bearer token rejected"
    );
}

/// Log an authenticated caller lacking the role a route requires.
pub fn role_denied(subject: &str, held: Role, required: Role) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ROLE_DENIED",
        %trace_id,
        subject = %Redacted(subject),
        %held,
        %required,
        "Insufficient role"
    );
}
