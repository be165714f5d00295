//! Log sanitization utilities
//!
//! Keeps API tokens out of logs and caps how much of a zone dump ends up in
//! a single debug line.

/// Maximum number of characters of a response body written to the log.
const TRUNCATE_LIMIT: usize = 256;

/// Placeholder written in place of redacted secrets.
const REDACTED: &str = "***";

/// Cut a response body down to [`TRUNCATE_LIMIT`] characters for logging.
///
/// The cut always lands on a character boundary. A suffix records the full
/// size in bytes.
pub fn truncate_for_log(s: &str) -> String {
    match s.char_indices().nth(TRUNCATE_LIMIT) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}... [truncated, total {} bytes]", &s[..cut], s.len()),
    }
}

/// Replace every occurrence of `secret` in `s` with a placeholder.
///
/// `reqwest` errors render the full request URL, which carries the `authToken`
/// query parameter for this API.
pub fn redact_secret(s: &str, secret: &str) -> String {
    if secret.is_empty() {
        return s.to_string();
    }
    s.replace(secret, REDACTED)
}
