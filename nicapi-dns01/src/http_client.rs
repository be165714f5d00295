//! Generic HTTP client tools
//!
//! Sending the request, logging, and reading the response body live here; the
//! provider module builds the `RequestBuilder` (URL, auth, headers, body) itself.
//!
//! There is no retry loop: every call is exactly one round trip and
//! retry policy belongs to the ACME orchestrator.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::{redact_secret, truncate_for_log};

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (including URL, headers, body, etc.)
    /// * `provider_name` - Provider name (for logging)
    /// * `method_name` - request method name (such as "GET", "POST", used for logs)
    /// * `url` - URL for logging, without query string
    /// * `secret` - credential to scrub from transport error messages
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` - returns status code and response text
    /// * `Err(ProviderError::Transport)` - connection failure, timeout or unreadable body
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
        secret: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| transport_error(provider_name, e, secret))?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        let response_text = response
            .text()
            .await
            .map_err(|e| transport_error(provider_name, e, secret))?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ProviderError::Decode)` - parsing failed
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::Decode {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

fn transport_error(provider_name: &str, error: reqwest::Error, secret: &str) -> ProviderError {
    let timed_out = error.is_timeout();
    // without_url() drops the request URL, redact_secret covers the source chain
    let error = error.without_url();
    let mut detail = error.to_string();
    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    let detail = redact_secret(&detail, secret);

    log::warn!("[{provider_name}] Request failed: {detail}");
    ProviderError::Transport {
        provider: provider_name.to_string(),
        detail,
        timed_out,
    }
}
