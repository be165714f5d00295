//! NicAPI ChallengeProvider trait 实现

use async_trait::async_trait;
use reqwest::Method;

use crate::error::{ProviderError, Result};
use crate::traits::ChallengeProvider;
use crate::types::CleanupMatch;
use crate::utils::domain::{normalize_domain_name, relative_record_name};

use super::{
    NicapiProvider, NicapiRecord, NicapiRecordMutation, NicapiZone, NicapiZoneData,
    NicapiZoneQuery, PROVIDER_NAME,
};

const ZONE_SHOW_PATH: &str = "/dns/zones/show";
const RECORD_ADD_PATH: &str = "/dns/zones/records/add";
const RECORD_DELETE_PATH: &str = "/dns/zones/records/delete";

/// Locate the TXT record named `name` in a zone snapshot.
///
/// Matches on relative name (ASCII case-insensitive, as DNS names compare) and
/// type `TXT`; if the provider returns duplicates, the first one wins.
pub(crate) fn find_txt_record<'a>(zone: &'a NicapiZone, name: &str) -> Option<&'a NicapiRecord> {
    zone.records
        .iter()
        .find(|record| record.name.eq_ignore_ascii_case(name) && record.is_txt())
}

/// Whether a stored TXT value is the challenge value, tolerating the quoting
/// some zone dumps apply to TXT data.
fn txt_value_matches(record: &NicapiRecord, value: &str) -> bool {
    record.data.as_deref().is_some_and(|data| {
        data == value
            || data
                .strip_prefix('"')
                .and_then(|d| d.strip_suffix('"'))
                .is_some_and(|d| d == value)
    })
}

impl NicapiProvider {
    /// Resolve the authoritative zone for `fqdn` and fetch a fresh record snapshot.
    pub(crate) async fn get_hosted_zone(&self, fqdn: &str) -> Result<NicapiZone> {
        let auth_zone = self.zone_locator.find_zone(fqdn).await?;
        let zone_name = normalize_domain_name(&auth_zone).to_string();

        let query = NicapiZoneQuery {
            zone: zone_name.clone(),
        };
        let mut data: NicapiZoneData = self
            .request_data(Method::GET, ZONE_SHOW_PATH, &query)
            .await?;

        if data.zone.name.is_empty() {
            data.zone.name = zone_name;
        }
        log::debug!(
            "[{PROVIDER_NAME}] Zone {} (id {:?}) has {} records",
            data.zone.name,
            data.zone.id,
            data.zone.records.len()
        );
        Ok(data.zone)
    }

    /// 从 FQDN 计算相对记录名（小写）
    fn record_name(zone: &NicapiZone, fqdn: &str) -> Result<String> {
        relative_record_name(fqdn, &zone.name)
            .map(|name| name.to_ascii_lowercase())
            .ok_or_else(|| ProviderError::ZoneLookup {
            provider: PROVIDER_NAME.to_string(),
            fqdn: fqdn.to_string(),
            detail: format!("name is not below zone '{}'", zone.name),
        })
    }

    async fn add_txt_record(&self, zone: &str, name: &str, value: &str) -> Result<()> {
        let body = NicapiRecordMutation {
            zone: zone.to_string(),
            records: vec![NicapiRecord::txt(name, value, self.record_ttl)],
        };
        self.request(Method::POST, RECORD_ADD_PATH, &body).await?;
        log::info!("[{PROVIDER_NAME}] Created TXT record {name} in zone {zone}");
        Ok(())
    }

    async fn delete_record(&self, zone: &str, name: &str) -> Result<()> {
        let body = NicapiRecordMutation {
            zone: zone.to_string(),
            records: vec![NicapiRecord::name_only(name)],
        };
        self.request(Method::POST, RECORD_DELETE_PATH, &body).await?;
        log::info!("[{PROVIDER_NAME}] Deleted record {name} in zone {zone}");
        Ok(())
    }
}

#[async_trait]
impl ChallengeProvider for NicapiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn present(&self, domain: &str, fqdn: &str, value: &str) -> Result<()> {
        log::debug!("[{PROVIDER_NAME}] Presenting challenge for {domain} at {fqdn}");

        let zone = self.get_hosted_zone(fqdn).await?;
        let name = Self::record_name(&zone, fqdn)?;

        if let Some(existing) = find_txt_record(&zone, &name) {
            if txt_value_matches(existing, value) {
                log::info!("[{PROVIDER_NAME}] TXT record {name} already set, nothing to do");
                return Ok(());
            }
            // no update endpoint: replace by delete + add
            self.delete_record(&zone.name, &existing.name).await?;
        }

        self.add_txt_record(&zone.name, &name, value).await
    }

    async fn clean_up(&self, domain: &str, fqdn: &str, value: &str) -> Result<()> {
        log::debug!("[{PROVIDER_NAME}] Cleaning up challenge for {domain} at {fqdn}");

        let zone = self.get_hosted_zone(fqdn).await?;
        let name = Self::record_name(&zone, fqdn)?;

        let Some(existing) = find_txt_record(&zone, &name) else {
            log::info!(
                "[{PROVIDER_NAME}] No TXT record {name} in zone {}, nothing to clean up",
                zone.name
            );
            return Ok(());
        };

        if self.cleanup_match == CleanupMatch::NameAndValue && !txt_value_matches(existing, value) {
            log::warn!(
                "[{PROVIDER_NAME}] TXT record {name} holds a different value, leaving it in place"
            );
            return Ok(());
        }

        self.delete_record(&zone.name, &existing.name).await
    }
}
