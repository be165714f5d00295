//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use nicapi_dns01::{
    CleanupMatch, NicapiConfig, NicapiProvider, ProviderError, Result, ZoneLocator,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_KEY: &str = "test-key";
pub const ZONE: &str = "example.com";
pub const FQDN: &str = "_acme-challenge.example.com.";

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: environment variable {} not set", $var);
                return;
            }
        )+
    };
}

/// Zone locator that always answers with a fixed zone.
pub struct StaticZoneLocator {
    zone: String,
}

impl StaticZoneLocator {
    pub fn new(zone: &str) -> Self {
        Self {
            zone: zone.to_string(),
        }
    }
}

#[async_trait]
impl ZoneLocator for StaticZoneLocator {
    async fn find_zone(&self, _fqdn: &str) -> Result<String> {
        Ok(self.zone.clone())
    }
}

/// Zone locator that never finds a zone.
pub struct FailingZoneLocator;

#[async_trait]
impl ZoneLocator for FailingZoneLocator {
    async fn find_zone(&self, fqdn: &str) -> Result<String> {
        Err(ProviderError::ZoneLookup {
            provider: "nicapi".to_string(),
            fqdn: fqdn.to_string(),
            detail: "no SOA record found".to_string(),
        })
    }
}

/// Provider pointed at `base_url` with `example.com.` as the authoritative zone.
pub fn provider_for(base_url: &str) -> NicapiProvider {
    provider_with(
        base_url,
        CleanupMatch::default(),
        Arc::new(StaticZoneLocator::new("example.com.")),
    )
}

pub fn provider_with(
    base_url: &str,
    cleanup_match: CleanupMatch,
    zone_locator: Arc<dyn ZoneLocator>,
) -> NicapiProvider {
    let config = NicapiConfig::new(TEST_KEY)
        .with_base_url(base_url)
        .with_nameservers(vec!["127.0.0.1:53".to_string()])
        .with_cleanup_match(cleanup_match);
    NicapiProvider::with_config(config)
        .expect("provider should build")
        .with_zone_locator(zone_locator)
}

/// 成功响应信封
pub fn success_envelope(data: Value) -> Value {
    json!({
        "metadata": {"clientTransactionId": "c-1", "serverTransactionId": "s-1"},
        "messages": {"errors": [], "warnings": [], "success": []},
        "status": "success",
        "data": data
    })
}

/// 失败响应信封
pub fn error_envelope(code: i64, message: &str) -> Value {
    json!({
        "metadata": {"clientTransactionId": "c-1", "serverTransactionId": "s-err"},
        "messages": {"errors": [{"code": code, "message": message}], "warnings": [], "success": []},
        "status": "error",
        "data": null
    })
}

pub fn zone_payload(records: Value) -> Value {
    json!({"zone": {"id": 1, "name": ZONE, "records": records}})
}

pub fn txt_record(id: i64, name: &str, data: &str) -> Value {
    json!({"id": id, "name": name, "ttl": "7200", "type": "TXT", "data": data})
}

/// `GET /dns/zones/show` 返回给定记录
pub fn zone_show_mock(records: Value) -> Mock {
    Mock::given(method("GET"))
        .and(path("/dns/zones/show"))
        .and(query_param("authToken", TEST_KEY))
        .and(body_json(json!({"zone": ZONE})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success_envelope(zone_payload(records))),
        )
}

pub fn add_mock(value: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path("/dns/zones/records/add"))
        .and(query_param("authToken", TEST_KEY))
        .and(body_json(json!({
            "zone": ZONE,
            "records": [{"name": "_acme-challenge", "ttl": "7200", "type": "TXT", "data": value}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope(json!({}))))
}

pub fn delete_mock() -> Mock {
    Mock::given(method("POST"))
        .and(path("/dns/zones/records/delete"))
        .and(query_param("authToken", TEST_KEY))
        .and(body_json(json!({
            "zone": ZONE,
            "records": [{"name": "_acme-challenge"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope(Value::Null)))
}

/// Any mutating call, for asserting that none happen.
pub fn any_mutation_mock() -> Mock {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope(Value::Null)))
}

/// Paths of all requests the server received, in arrival order.
pub async fn received_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect()
}
