use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single message reported in the `messages` block of a `NicAPI` response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Numeric provider message code.
    #[serde(default)]
    pub code: i64,
    /// Human-readable message text.
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for ApiMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Unified error type for all challenge provider operations.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// None of these errors are retried internally. [`is_transient`](Self::is_transient) tells the
/// calling ACME orchestrator whether retrying the whole operation is likely to help.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// No credential was supplied, or it was empty.
    #[error("[{provider}] Credentials missing{}", env_hint(.env_var))]
    MissingCredential {
        /// Provider that produced the error.
        provider: String,
        /// Environment variable the credential was expected in, if any.
        env_var: Option<String>,
    },

    /// A configuration value is malformed (e.g. an unparsable nameserver address).
    #[error("[{provider}] Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The authoritative zone for a challenge name could not be determined.
    #[error("[{provider}] No authoritative zone found for '{fqdn}': {detail}")]
    ZoneLookup {
        /// Provider that produced the error.
        provider: String,
        /// The name that was being resolved.
        fqdn: String,
        /// Error details.
        detail: String,
    },

    /// The API could not be reached (connection failure, timeout, truncated body).
    #[error("[{provider}] {}: {detail}", transport_label(.timed_out))]
    Transport {
        /// Provider that produced the error.
        provider: String,
        /// Error details. Never contains the credential.
        detail: String,
        /// Whether the request hit the configured timeout.
        timed_out: bool,
    },

    /// The response envelope or its payload could not be decoded.
    #[error("[{provider}] Decode error: {detail}")]
    Decode {
        /// Provider that produced the error.
        provider: String,
        /// Details about the decode failure.
        detail: String,
    },

    /// The envelope reported a status other than `"success"`.
    #[error("[{provider}] API error{}", api_details(.messages))]
    Api {
        /// Provider that produced the error.
        provider: String,
        /// Error messages reported by the provider, in response order.
        messages: Vec<ApiMessage>,
        /// Server transaction id of the failed request, if reported.
        transaction_id: Option<String>,
    },

    /// Failed to serialize a request body.
    #[error("[{provider}] Serialization error: {detail}")]
    Serialization {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },
}

fn env_hint(env_var: &Option<String>) -> String {
    env_var
        .as_deref()
        .map(|var| format!(" (set {var})"))
        .unwrap_or_default()
}

fn transport_label(timed_out: &bool) -> &'static str {
    if *timed_out {
        "Request timeout"
    } else {
        "Network error"
    }
}

fn api_details(messages: &[ApiMessage]) -> String {
    if messages.is_empty() {
        return " (no error details reported)".to_string();
    }
    let joined = messages
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    format!(": {joined}")
}

impl ProviderError {
    /// 是否为瞬时错误（网络、超时），调用方重试整个操作可能成功。
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
