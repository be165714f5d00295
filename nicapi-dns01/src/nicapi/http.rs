//! NicAPI HTTP 请求方法

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::utils::log_sanitizer::truncate_for_log;

use super::{NicapiProvider, NicapiResponse, PROVIDER_NAME};

impl NicapiProvider {
    /// 执行请求并解开响应信封
    ///
    /// The token travels as the `authToken` query parameter; only
    /// base URL + path is ever logged. Returns the envelope's `data` payload,
    /// which may be absent for mutations.
    pub(crate) async fn request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Option<Value>> {
        let url = format!("{}{path}", self.base_url);
        let body_json = serde_json::to_string(body).map_err(Self::serialization_error)?;
        log::debug!("[{PROVIDER_NAME}] Request Body: {}", truncate_for_log(&body_json));

        let token = self.api_key.expose_secret();
        let request = self
            .client
            .request(method.clone(), &url)
            .query(&[("authToken", token)])
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body_json);

        let (status, response_text) =
            HttpUtils::execute_request(request, PROVIDER_NAME, method.as_str(), &url, token)
                .await?;

        let response: NicapiResponse = HttpUtils::parse_json(&response_text, PROVIDER_NAME)
            .map_err(|e| match e {
                ProviderError::Decode { provider, detail } => ProviderError::Decode {
                    provider,
                    detail: format!("HTTP {status}: {detail}"),
                },
                other => other,
            })?;

        if let Some(warnings) = response.messages.as_ref().and_then(|m| m.warnings.as_ref()) {
            for warning in warnings {
                log::warn!("[{PROVIDER_NAME}] {method} {path}: {warning}");
            }
        }

        if !response.is_success() {
            let err = Self::api_error(response);
            log::error!("[{PROVIDER_NAME}] {method} {path} failed: {err}");
            return Err(err);
        }

        log::info!(
            "[{PROVIDER_NAME}] {method} {path} ok, transaction {}",
            response.server_transaction_id().unwrap_or("<none>")
        );

        Ok(response.data)
    }

    /// 执行请求并将 data 字段解析为 `T`
    pub(crate) async fn request_data<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let data = self
            .request(method, path, body)
            .await?
            .ok_or_else(|| Self::decode_error("response is missing the data field"))?;

        serde_json::from_value(data).map_err(|e| {
            log::error!("[{PROVIDER_NAME}] {path} payload parse failed: {e}");
            Self::decode_error(e)
        })
    }
}
