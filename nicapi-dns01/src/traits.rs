use async_trait::async_trait;

use crate::error::Result;

/// 权威区域定位 Trait
///
/// Resolves the DNS zone that is authoritative for a challenge name, e.g.
/// `_acme-challenge.sub.example.com.` -> `example.com.`.
#[async_trait]
pub trait ZoneLocator: Send + Sync {
    /// Returns the authoritative zone name for `fqdn`, with or without a
    /// trailing dot. Fails with [`ProviderError::ZoneLookup`](crate::ProviderError::ZoneLookup).
    async fn find_zone(&self, fqdn: &str) -> Result<String>;
}

/// DNS-01 challenge provider Trait
///
/// The two entry points an ACME orchestrator calls per authorization. Both are
/// idempotent and perform no retries; the orchestrator owns retry policy.
#[async_trait]
pub trait ChallengeProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Publish the TXT record `value` at `fqdn`.
    ///
    /// Succeeds without mutation when the record already carries `value`.
    async fn present(&self, domain: &str, fqdn: &str, value: &str) -> Result<()>;

    /// Remove the TXT record at `fqdn`.
    ///
    /// Succeeds without mutation when no matching record exists.
    async fn clean_up(&self, domain: &str, fqdn: &str, value: &str) -> Result<()>;
}
