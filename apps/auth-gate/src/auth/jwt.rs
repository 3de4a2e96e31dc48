//! Token codec: HS-family compact JWS tokens.
//!
//! Minting goes through `jsonwebtoken`. Verification is an explicit pipeline
//! so every failure lands in exactly one [`TokenError`] class:
//!
//! 1. split `header.claims.signature`; the signature is everything after the
//!    second `.`
//! 2. recompute the MAC with the *configured* algorithm and compare in
//!    constant time
//! 3. require the header to declare that same algorithm
//! 4. decode claims and check the validity window (no leeway)

use std::time::SystemTime;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::auth::claims::{unix_seconds, Claims};
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token has expired")]
    Expired,
    #[error("token is not yet valid")]
    NotYetValid,
    #[error("token signature is invalid")]
    SignatureInvalid,
}

impl TokenError {
    /// Stable label for logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed",
            TokenError::Expired => "expired",
            TokenError::NotYetValid => "not_yet_valid",
            TokenError::SignatureInvalid => "signature_invalid",
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenHeader {
    alg: Option<String>,
}

/// Sign `claims` into a compact token with the configured HMAC algorithm.
pub fn mint_token(claims: &Claims, security: &SecurityConfig) -> Result<String, AppError> {
    encode(
        &Header::new(security.algorithm()),
        claims,
        &EncodingKey::from_secret(security.jwt_secret()),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify `token` against the current time.
pub fn verify_token(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    verify_token_at(token, SystemTime::now(), security)
}

/// Verify `token` as of `now`.
pub fn verify_token_at(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<Claims, TokenError> {
    // Everything after the second '.' is the signature, so a stray '.' there
    // fails base64url decoding below rather than reshaping the segments.
    let mut segments = token.splitn(3, '.');
    let (Some(header_b64), Some(claims_b64), Some(signature_b64)) =
        (segments.next(), segments.next(), segments.next())
    else {
        return Err(TokenError::Malformed);
    };
    let signing_input = &token[..header_b64.len() + 1 + claims_b64.len()];

    // A signature segment that is not even base64url cannot be a valid MAC.
    let provided = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| TokenError::SignatureInvalid)?;
    let expected = compute_signature(
        security.algorithm(),
        security.jwt_secret(),
        signing_input.as_bytes(),
    )
    .ok_or(TokenError::SignatureInvalid)?;
    if !bool::from(provided.as_slice().ct_eq(expected.as_slice())) {
        return Err(TokenError::SignatureInvalid);
    }

    let header: TokenHeader = decode_segment(header_b64)?;
    if header.alg.as_deref() != Some(algorithm_name(security.algorithm())) {
        return Err(TokenError::SignatureInvalid);
    }

    let claims: Claims = decode_segment(claims_b64)?;
    claims.validate().map_err(|_| TokenError::Malformed)?;

    let now = unix_seconds(now).map_err(|_| TokenError::NotYetValid)?;
    if claims.exp() <= now {
        return Err(TokenError::Expired);
    }
    if claims.iat() > now || claims.nbf().is_some_and(|nbf| nbf > now) {
        return Err(TokenError::NotYetValid);
    }

    Ok(claims)
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

fn algorithm_name(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::HS384 => "HS384",
        Algorithm::HS512 => "HS512",
        _ => "HS256",
    }
}

/// MAC over `input`. `SecurityConfig` only admits HS256/384/512.
fn compute_signature(algorithm: Algorithm, secret: &[u8], input: &[u8]) -> Option<Vec<u8>> {
    match algorithm {
        Algorithm::HS384 => hmac_digest::<Hmac<Sha384>>(secret, input),
        Algorithm::HS512 => hmac_digest::<Hmac<Sha512>>(secret, input),
        _ => hmac_digest::<Hmac<Sha256>>(secret, input),
    }
}

fn hmac_digest<M: Mac + KeyInit>(secret: &[u8], input: &[u8]) -> Option<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(secret).ok()?;
    mac.update(input);
    Some(mac.finalize().into_bytes().to_vec())
}
