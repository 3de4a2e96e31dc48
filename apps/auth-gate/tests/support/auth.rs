//! Token helpers for tests

use std::time::{Duration, SystemTime};

use auth_gate::auth::claims::{Claims, Role};
use auth_gate::auth::jwt::mint_token;
use auth_gate::state::security_config::SecurityConfig;

/// Mint a token for `sub` issued now with the configured TTL.
pub fn mint_test_token(sub: &str, role: Role, sec: &SecurityConfig) -> String {
    mint_token_at(sub, role, SystemTime::now(), sec.token_ttl(), sec)
}

pub fn mint_token_at(
    sub: &str,
    role: Role,
    issued_at: SystemTime,
    ttl: Duration,
    sec: &SecurityConfig,
) -> String {
    let claims = Claims::issue(sub, role, issued_at, ttl).expect("valid claims");
    mint_token(&claims, sec).expect("should mint token successfully")
}

/// Full Authorization header value including the "Bearer " prefix.
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// A correctly signed token that expired an hour ago.
pub fn mint_expired_token(sub: &str, role: Role, sec: &SecurityConfig) -> String {
    let two_hours_ago = SystemTime::now() - Duration::from_secs(7200);
    mint_token_at(sub, role, two_hours_ago, Duration::from_secs(3600), sec)
}

/// A correctly signed token that only becomes valid in an hour.
pub fn mint_future_token(sub: &str, role: Role, sec: &SecurityConfig) -> String {
    let in_an_hour = SystemTime::now() + Duration::from_secs(3600);
    mint_token_at(sub, role, in_an_hour, Duration::from_secs(3600), sec)
}

/// Replace one character in the middle of the signature segment with a
/// different base64url character.
pub fn flip_signature_char(token: &str) -> String {
    let sig_start = token.rfind('.').expect("compact token") + 1;
    let idx = sig_start + (token.len() - sig_start) / 2;

    let mut bytes = token.as_bytes().to_vec();
    bytes[idx] = if bytes[idx] == b'A' { b'B' } else { b'A' };
    String::from_utf8(bytes).expect("ascii token")
}
