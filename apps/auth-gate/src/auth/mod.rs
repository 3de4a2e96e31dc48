pub mod claims;
pub mod credentials;
pub mod jwt;

pub use claims::{Claims, ClaimsError, Role};
pub use credentials::{CredentialRecord, CredentialStore, InMemoryCredentialStore};
pub use jwt::{mint_token, verify_token, verify_token_at, TokenError};
