//! NicAPI 类型定义

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ApiMessage;

/// NicAPI 通用响应
#[derive(Debug, Deserialize)]
pub struct NicapiResponse {
    #[serde(default)]
    pub metadata: Option<NicapiMetadata>,
    #[serde(default)]
    pub messages: Option<NicapiMessages>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl NicapiResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    pub fn server_transaction_id(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.server_transaction_id.as_deref())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicapiMetadata {
    #[allow(dead_code)]
    pub client_transaction_id: Option<String>,
    pub server_transaction_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NicapiMessages {
    pub errors: Option<Vec<ApiMessage>>,
    pub warnings: Option<Vec<ApiMessage>>,
    #[allow(dead_code)]
    pub success: Option<Vec<ApiMessage>>,
}

/// `GET /dns/zones/show` 的 data 字段
#[derive(Debug, Deserialize)]
pub struct NicapiZoneData {
    pub zone: NicapiZone,
}

/// NicAPI Zone 结构
#[derive(Debug, Deserialize)]
pub struct NicapiZone {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub records: Vec<NicapiRecord>,
}

/// NicAPI DNS Record 结构（请求与响应共用）
///
/// Absent fields are skipped on serialization so that a deletion request
/// carries only `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicapiRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Relative name; the apex may come back as `null` or `""`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub ttl: Option<String>,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl NicapiRecord {
    /// A fully specified TXT record for creation.
    pub fn txt(name: impl Into<String>, value: impl Into<String>, ttl: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            ttl: Some(ttl.to_string()),
            record_type: Some("TXT".to_string()),
            data: Some(value.into()),
        }
    }

    /// Just enough of a record to target a deletion by name.
    pub fn name_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_txt(&self) -> bool {
        self.record_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("TXT"))
    }
}

/// `POST /dns/zones/records/{add,delete}` 请求体
#[derive(Debug, Serialize)]
pub struct NicapiRecordMutation {
    pub zone: String,
    pub records: Vec<NicapiRecord>,
}

/// `GET /dns/zones/show` 请求体
#[derive(Debug, Serialize)]
pub struct NicapiZoneQuery {
    pub zone: String,
}

/// TTL 在部分响应中为数字，在请求中为字符串
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// `null` 视为默认值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
