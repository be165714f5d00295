//! NicAPI error mapping

use crate::error::ProviderError;

use super::{NicapiProvider, NicapiResponse, PROVIDER_NAME};

impl NicapiProvider {
    /// Map an envelope whose status is not `"success"` to [`ProviderError::Api`].
    ///
    /// NicAPI reports failures inside the envelope rather than through HTTP
    /// status codes, so there is no per-code mapping: every reported error is
    /// carried through in response order.
    pub(crate) fn api_error(response: NicapiResponse) -> ProviderError {
        let transaction_id = response.server_transaction_id().map(ToString::to_string);
        let messages = response
            .messages
            .and_then(|m| m.errors)
            .unwrap_or_default();

        ProviderError::Api {
            provider: PROVIDER_NAME.to_string(),
            messages,
            transaction_id,
        }
    }

    pub(crate) fn decode_error(detail: impl ToString) -> ProviderError {
        ProviderError::Decode {
            provider: PROVIDER_NAME.to_string(),
            detail: detail.to_string(),
        }
    }

    pub(crate) fn serialization_error(detail: impl ToString) -> ProviderError {
        ProviderError::Serialization {
            provider: PROVIDER_NAME.to_string(),
            detail: detail.to_string(),
        }
    }
}
