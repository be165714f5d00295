use serde::{Deserialize, Serialize};

use crate::nicapi::{
    DEFAULT_RECORD_TTL, DEFAULT_RECURSIVE_NAMESERVERS, DEFAULT_REQUEST_TIMEOUT_SECS,
    NICAPI_API_BASE,
};

// ============ Cleanup Policy ============

/// How [`clean_up`](crate::ChallengeProvider::clean_up) decides that a located
/// record is the one to delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanupMatch {
    /// Delete only when the record's data equals the challenge value.
    /// A record carrying a different value is left in place.
    #[default]
    NameAndValue,
    /// Delete whatever TXT record sits at the challenge name.
    NameOnly,
}

impl std::fmt::Display for CleanupMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameAndValue => write!(f, "name-and-value"),
            Self::NameOnly => write!(f, "name-only"),
        }
    }
}

// ============ Provider Configuration ============

/// Configuration for [`NicapiProvider`](crate::NicapiProvider).
///
/// Only `api_key` is required when deserializing; every other field falls
/// back to its default.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicapiConfig {
    /// API token sent as the `authToken` query parameter.
    pub api_key: String,
    /// Recursive nameservers used for zone discovery (`ip` or `ip:port`).
    /// An empty list selects the host system resolver configuration.
    #[serde(default = "default_nameservers")]
    pub nameservers: Vec<String>,
    /// API base URL, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// TTL in seconds for created challenge records.
    #[serde(default = "default_record_ttl")]
    pub record_ttl: u32,
    /// Whole-request timeout per HTTP round trip, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Record matching policy for cleanup.
    #[serde(default)]
    pub cleanup_match: CleanupMatch,
}

impl NicapiConfig {
    /// Configuration with defaults for everything but the credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            nameservers: default_nameservers(),
            base_url: default_base_url(),
            record_ttl: default_record_ttl(),
            timeout_secs: default_timeout_secs(),
            cleanup_match: CleanupMatch::default(),
        }
    }

    #[must_use]
    pub fn with_nameservers(mut self, nameservers: Vec<String>) -> Self {
        self.nameservers = nameservers;
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_cleanup_match(mut self, cleanup_match: CleanupMatch) -> Self {
        self.cleanup_match = cleanup_match;
        self
    }
}

impl std::fmt::Debug for NicapiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NicapiConfig")
            .field("api_key", &"[REDACTED]")
            .field("nameservers", &self.nameservers)
            .field("base_url", &self.base_url)
            .field("record_ttl", &self.record_ttl)
            .field("timeout_secs", &self.timeout_secs)
            .field("cleanup_match", &self.cleanup_match)
            .finish()
    }
}

fn default_nameservers() -> Vec<String> {
    DEFAULT_RECURSIVE_NAMESERVERS
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_base_url() -> String {
    NICAPI_API_BASE.to_string()
}

fn default_record_ttl() -> u32 {
    DEFAULT_RECORD_TTL
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
