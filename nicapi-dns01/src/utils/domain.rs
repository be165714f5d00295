//! 域名名称处理

/// 去掉域名末尾的点
pub fn normalize_domain_name(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Derive the zone-relative record name for a fully-qualified name.
///
/// Both inputs may carry a trailing dot. Returns `None` when `fqdn` is not
/// strictly below `zone`, including when it is the zone apex itself.
///
/// `_acme-challenge.example.com.` + `example.com` -> `_acme-challenge`
pub fn relative_record_name(fqdn: &str, zone: &str) -> Option<String> {
    let full = normalize_domain_name(fqdn);
    let zone = normalize_domain_name(zone);
    if zone.is_empty() {
        return None;
    }

    let split = full.len().checked_sub(zone.len())?;
    if !full.get(split..)?.eq_ignore_ascii_case(zone) {
        return None;
    }
    let relative = full.get(..split)?.strip_suffix('.')?;
    if relative.is_empty() {
        None
    } else {
        Some(relative.to_string())
    }
}

/// Guess the ACME identifier from a challenge name by dropping a leading
/// `_acme-challenge.` label.
pub fn challenge_domain(fqdn: &str) -> &str {
    let name = normalize_domain_name(fqdn);
    name.strip_prefix("_acme-challenge.").unwrap_or(name)
}
