//! Utility modules.

/// Domain name normalization helpers.
pub mod domain;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
