use std::fmt;

/// Mask an identity for logs: keep the first character, hide the rest.
///
/// Email-shaped identities keep their domain (`u***@example.com`).
pub fn mask_identity(input: &str) -> String {
    let (local, domain) = match input.find('@') {
        Some(at) => input.split_at(at),
        None => (input, ""),
    };

    match local.chars().next() {
        None => domain.to_string(),
        Some(first) => format!("{first}***{domain}"),
    }
}

/// Displays as the masked form of the wrapped identity.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mask_identity(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
