//! Authoritative zone discovery over recursive DNS.

use std::net::{IpAddr, SocketAddr};

use async_trait::async_trait;
use hickory_resolver::{
    TokioResolver,
    config::{NameServerConfigGroup, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    proto::rr::RecordType,
};

use crate::error::{ProviderError, Result};
use crate::nicapi::PROVIDER_NAME;
use crate::traits::ZoneLocator;
use crate::utils::domain::normalize_domain_name;

const DNS_PORT: u16 = 53;

/// [`ZoneLocator`] that walks up the label hierarchy issuing SOA queries.
///
/// `_acme-challenge.sub.example.com.` is tried as-is, then `sub.example.com.`,
/// `example.com.` and `com.`; the first name that answers with an SOA record it
/// owns is the zone.
pub struct HickoryZoneLocator {
    resolver: TokioResolver,
}

impl HickoryZoneLocator {
    /// Query the given recursive nameservers (`ip` or `ip:port`).
    ///
    /// An empty list uses the host system DNS configuration.
    pub fn new<S: AsRef<str>>(nameservers: &[S]) -> Result<Self> {
        if nameservers.is_empty() {
            return Ok(Self::system());
        }

        let addrs = nameservers
            .iter()
            .map(|ns| parse_nameserver(ns.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut group = NameServerConfigGroup::new();
        for addr in &addrs {
            group.merge(NameServerConfigGroup::from_ips_clear(
                &[addr.ip()],
                addr.port(),
                true,
            ));
        }

        let config = ResolverConfig::from_parts(None, vec![], group);
        let resolver =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
                .with_options(ResolverOpts::default())
                .build();

        log::debug!("[{PROVIDER_NAME}] Zone lookups via {addrs:?}");
        Ok(Self { resolver })
    }

    /// Use the host system DNS configuration (e.g. `/etc/resolv.conf`).
    ///
    /// Falls back to Hickory's default upstream set if it cannot be loaded.
    pub fn system() -> Self {
        match TokioResolver::builder_tokio() {
            Ok(builder) => Self {
                resolver: builder.build(),
            },
            Err(e) => {
                log::warn!(
                    "[{PROVIDER_NAME}] Failed to load system DNS configuration, \
                     falling back to defaults: {e}"
                );
                Self {
                    resolver: TokioResolver::builder_with_config(
                        ResolverConfig::default(),
                        TokioConnectionProvider::default(),
                    )
                    .build(),
                }
            }
        }
    }
}

#[async_trait]
impl ZoneLocator for HickoryZoneLocator {
    async fn find_zone(&self, fqdn: &str) -> Result<String> {
        let candidates = candidate_zones(fqdn);
        if candidates.is_empty() {
            return Err(zone_lookup_error(fqdn, "empty domain name"));
        }

        let mut last_error = None;
        for candidate in candidates {
            let query = format!("{candidate}.");
            match self.resolver.soa_lookup(query.as_str()).await {
                Ok(lookup) => {
                    let owns_soa = lookup.as_lookup().records().iter().any(|record| {
                        record.record_type() == RecordType::SOA
                            && normalize_domain_name(&record.name().to_ascii())
                                .eq_ignore_ascii_case(candidate)
                    });
                    if owns_soa {
                        log::debug!("[{PROVIDER_NAME}] Authoritative zone for {fqdn}: {query}");
                        return Ok(query);
                    }
                }
                Err(e) => {
                    log::trace!("[{PROVIDER_NAME}] SOA lookup for {query} failed: {e}");
                    last_error = Some(e.to_string());
                }
            }
        }

        Err(zone_lookup_error(
            fqdn,
            &last_error.unwrap_or_else(|| "no SOA record found".to_string()),
        ))
    }
}

/// Parse `ip`, `ip:port` or `[ipv6]:port`; the port defaults to 53.
pub(crate) fn parse_nameserver(nameserver: &str) -> Result<SocketAddr> {
    let trimmed = nameserver.trim();
    if let Ok(addr) = trimmed.parse::<SocketAddr>() {
        return Ok(addr);
    }
    trimmed
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
        .map_err(|e| ProviderError::InvalidParameter {
            provider: PROVIDER_NAME.to_string(),
            param: "nameservers".to_string(),
            detail: format!("'{nameserver}': {e}"),
        })
}

/// Every suffix of `fqdn` on a label boundary, longest first.
fn candidate_zones(fqdn: &str) -> Vec<&str> {
    let name = normalize_domain_name(fqdn);
    if name.is_empty() {
        return Vec::new();
    }

    let mut candidates = vec![name];
    let mut rest = name;
    while let Some((_, parent)) = rest.split_once('.') {
        if parent.is_empty() {
            break;
        }
        candidates.push(parent);
        rest = parent;
    }
    candidates
}

fn zone_lookup_error(fqdn: &str, detail: &str) -> ProviderError {
    ProviderError::ZoneLookup {
        provider: PROVIDER_NAME.to_string(),
        fqdn: fqdn.to_string(),
        detail: detail.to_string(),
    }
}
