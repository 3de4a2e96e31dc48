//! Read-only credential store.
//!
//! Secrets are reduced to a SHA-256 digest when a record is built, so the
//! login comparison is always between two 32-byte values and runs in
//! constant time regardless of where (or whether) the inputs differ.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::auth::claims::Role;

type SecretDigest = [u8; 32];

fn digest(secret: &str) -> SecretDigest {
    Sha256::digest(secret.as_bytes()).into()
}

#[derive(Clone)]
pub struct CredentialRecord {
    identity: String,
    secret_digest: SecretDigest,
    role: Role,
}

impl CredentialRecord {
    pub fn new(identity: impl Into<String>, secret: &str, role: Role) -> Self {
        Self {
            identity: identity.into(),
            secret_digest: digest(secret),
            role,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Constant-time check of a caller-supplied secret.
    pub fn secret_matches(&self, candidate: &str) -> bool {
        digest(candidate)[..].ct_eq(&self.secret_digest[..]).into()
    }
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("identity", &self.identity)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Stand-in compared against when the identity is unknown, so a miss costs
/// the same as a wrong secret.
pub(crate) static UNKNOWN_IDENTITY: Lazy<CredentialRecord> =
    Lazy::new(|| CredentialRecord::new("", "\u{0}unknown-identity", Role::User));

/// Maps an identity to its credential record.
pub trait CredentialStore: Send + Sync {
    fn lookup(&self, identity: &str) -> Option<&CredentialRecord>;
}

/// Immutable in-memory store, populated once at startup.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCredentialStore {
    records: HashMap<String, CredentialRecord>,
}

impl InMemoryCredentialStore {
    pub fn from_records(records: impl IntoIterator<Item = CredentialRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.identity.clone(), record))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn lookup(&self, identity: &str) -> Option<&CredentialRecord> {
        self.records.get(identity)
    }
}
