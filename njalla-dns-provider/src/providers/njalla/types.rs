//! Njalla JSON-RPC 类型定义

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// JSON-RPC 请求信封
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a, P: Serialize> {
    pub method: &'a str,
    pub params: &'a P,
}

/// JSON-RPC 响应信封
///
/// 成功时只有 `result`，失败时带 `error`。
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// `get-domain` 结果
#[derive(Debug, Deserialize)]
pub struct NjallaDomain {
    pub name: String,
}

/// `list-records` 结果
#[derive(Debug, Deserialize)]
pub struct RecordListResult {
    #[serde(default)]
    pub records: Vec<NjallaRecord>,
}

/// Njalla DNS Record 结构（响应）
///
/// `name` 是相对名称（`"@"` 表示 apex）。
#[derive(Debug, Deserialize)]
pub struct NjallaRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub content: String,
    pub ttl: u32,
    #[serde(default)]
    pub prio: Option<u16>,
    #[serde(default)]
    pub weight: Option<u16>,
    #[serde(default)]
    pub port: Option<u16>,
}

// ============ 请求参数 ============

#[derive(Debug, Serialize)]
pub struct DomainParams<'a> {
    pub domain: &'a str,
}

/// `add-record` 参数，SRV 记录额外带 prio/weight/port
#[derive(Debug, Serialize)]
pub struct AddRecordParams<'a> {
    pub domain: &'a str,
    #[serde(rename = "type")]
    pub record_type: &'a str,
    pub name: &'a str,
    pub content: &'a str,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prio: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Serialize)]
pub struct EditRecordParams<'a> {
    pub id: Value,
    pub domain: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RemoveRecordParams<'a> {
    pub domain: &'a str,
    pub id: Value,
}

// ============ 记录 ID ============

/// 记录 ID 可能是字符串或数字
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

/// Read an id out of a JSON value, accepting strings and numbers.
pub fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 发送给 API 的 ID：纯数字按数字发送，其余按字符串
pub fn wire_id(id: &str) -> Value {
    match id.parse::<u64>() {
        // "007" 之类保持原样
        Ok(n) if n.to_string() == id => Value::from(n),
        _ => Value::String(id.to_string()),
    }
}
