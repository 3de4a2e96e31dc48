//! Parsing of the `AUTH_GATE_CREDENTIALS` list.
//!
//! Format: comma-separated `identity:secret:role` entries, e.g.
//! `admin:adminpass:admin,user1:userpass:user`. The secret may itself
//! contain `:`; identity and role may not.

use crate::auth::claims::Role;
use crate::auth::credentials::{CredentialRecord, InMemoryCredentialStore};
use crate::error::AppError;

pub fn parse_credentials(raw: &str) -> Result<InMemoryCredentialStore, AppError> {
    let mut records = Vec::new();

    for (index, entry) in raw
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .enumerate()
    {
        let (identity, rest) = entry
            .split_once(':')
            .ok_or_else(|| invalid_entry(index, "expected identity:secret:role"))?;
        let (secret, role) = rest
            .rsplit_once(':')
            .ok_or_else(|| invalid_entry(index, "expected identity:secret:role"))?;

        if identity.is_empty() {
            return Err(invalid_entry(index, "identity is empty"));
        }
        if secret.is_empty() {
            return Err(invalid_entry(index, "secret is empty"));
        }
        let role: Role = role
            .parse()
            .map_err(|_| invalid_entry(index, "role must be 'admin' or 'user'"))?;

        records.push(CredentialRecord::new(identity, secret, role));
    }

    if records.is_empty() {
        return Err(AppError::config(
            "AUTH_GATE_CREDENTIALS must contain at least one entry",
        ));
    }

    Ok(InMemoryCredentialStore::from_records(records))
}

// Entry index only; the entry itself may hold a secret.
fn invalid_entry(index: usize, why: &str) -> AppError {
    AppError::config(format!("AUTH_GATE_CREDENTIALS entry #{}: {why}", index + 1))
}
