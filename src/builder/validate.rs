//! Field-level checks and password hashing.

use sha1::{Digest, Sha1};

/// Loose address check: one `@`, a non-empty local part and a dotted domain.
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Recovery phones are E.164: a leading `+` followed by digits.
pub fn is_phone(value: &str) -> bool {
    let Some(rest) = value.strip_prefix('+') else {
        return false;
    };
    let digits = rest.chars().filter(char::is_ascii_digit).count();
    digits > 0
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '.'))
}

/// Lowercase hex SHA-1 digest of a password.
pub fn sha1_hex(plaintext: &str) -> String {
    format!("{:x}", Sha1::digest(plaintext.as_bytes()))
}
