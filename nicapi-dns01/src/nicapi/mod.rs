//! Lumaserv / NicAPI DNS Provider
//!
//! API documentation: <https://docs.nicapi.eu/de/docs/dns/zones#dns-zones>

mod error;
mod http;
mod provider;
mod types;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use secrecy::SecretString;

use crate::error::{ProviderError, Result};
use crate::traits::ZoneLocator;
use crate::types::{CleanupMatch, NicapiConfig};
use crate::zone::HickoryZoneLocator;

pub(crate) use types::{
    NicapiRecord, NicapiRecordMutation, NicapiResponse, NicapiZone, NicapiZoneData,
    NicapiZoneQuery,
};

pub const NICAPI_API_BASE: &str = "https://connect.nicapi.eu/api/v1";
/// 读取凭证的环境变量名
pub const API_KEY_ENV: &str = "LUMASERV_API_KEY";
/// 新建挑战记录的 TTL（秒），120 分钟
pub const DEFAULT_RECORD_TTL: u32 = 120 * 60;
/// 默认递归 DNS 服务器
pub const DEFAULT_RECURSIVE_NAMESERVERS: &[&str] = &["8.8.8.8:53", "8.8.4.4:53"];

pub(crate) const PROVIDER_NAME: &str = "nicapi";
/// 默认请求超时（秒）
pub(crate) const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("nicapi-dns01/", env!("CARGO_PKG_VERSION"));

/// NicAPI DNS-01 challenge provider
///
/// Immutable after construction; share it behind an `Arc` across concurrent
/// challenges.
pub struct NicapiProvider {
    pub(crate) client: Client,
    pub(crate) api_key: SecretString,
    pub(crate) base_url: String,
    pub(crate) record_ttl: u32,
    pub(crate) cleanup_match: CleanupMatch,
    pub(crate) zone_locator: Arc<dyn ZoneLocator>,
}

impl NicapiProvider {
    /// Provider with an explicit credential and default settings otherwise.
    pub fn new(api_key: impl Into<String>, nameservers: Vec<String>) -> Result<Self> {
        Self::with_config(NicapiConfig::new(api_key).with_nameservers(nameservers))
    }

    /// Provider with the credential read from [`API_KEY_ENV`].
    pub fn from_env(nameservers: Vec<String>) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredential {
                provider: PROVIDER_NAME.to_string(),
                env_var: Some(API_KEY_ENV.to_string()),
            });
        }
        Self::new(api_key, nameservers)
    }

    pub fn with_config(config: NicapiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredential {
                provider: PROVIDER_NAME.to_string(),
                env_var: None,
            });
        }

        if config.timeout_secs == 0 {
            return Err(ProviderError::InvalidParameter {
                provider: PROVIDER_NAME.to_string(),
                param: "timeout_secs".to_string(),
                detail: "must be at least 1 second".to_string(),
            });
        }

        let zone_locator = HickoryZoneLocator::new(&config.nameservers)?;
        let client = create_http_client(config.timeout_secs)?;

        Ok(Self {
            client,
            api_key: SecretString::from(config.api_key),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            record_ttl: config.record_ttl,
            cleanup_match: config.cleanup_match,
            zone_locator: Arc::new(zone_locator),
        })
    }

    /// Replace the zone locator, e.g. with a static mapping in tests.
    #[must_use]
    pub fn with_zone_locator(mut self, zone_locator: Arc<dyn ZoneLocator>) -> Self {
        self.zone_locator = zone_locator;
        self
    }
}

impl std::fmt::Debug for NicapiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NicapiProvider")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("record_ttl", &self.record_ttl)
            .field("cleanup_match", &self.cleanup_match)
            .finish_non_exhaustive()
    }
}

/// 创建带超时配置的 HTTP Client
fn create_http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(
            DEFAULT_CONNECT_TIMEOUT_SECS.min(timeout_secs),
        ))
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ProviderError::InvalidParameter {
            provider: PROVIDER_NAME.to_string(),
            param: "http_client".to_string(),
            detail: e.to_string(),
        })
}
