//! Log sanitization utilities
//!
//! Keeps API tokens and large response bodies out of debug/error logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret left visible when masked.
const SECRET_VISIBLE_PREFIX: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` bytes with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a secret for `Debug` output, keeping only a short prefix.
///
/// Secrets shorter than twice the visible prefix are fully masked.
pub fn mask_secret(secret: &str) -> String {
    if secret.len() < SECRET_VISIBLE_PREFIX * 2 {
        "****".to_string()
    } else {
        format!(
            "{}****",
            &secret[..floor_char_boundary(secret, SECRET_VISIBLE_PREFIX)]
        )
    }
}
