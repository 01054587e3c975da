use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::providers::common::full_name;

/// Provider identifier used in error values produced outside a provider instance.
pub(crate) const PROVIDER_ID: &str = "njalla";

// ============ DNS Record Types ============

/// DNS record type identifier.
///
/// Serialized as the upper-case type name (`"A"`, `"AAAA"`, `"SRV"`, ...).
/// Names are parsed case-insensitively; types this crate has no variant for
/// are kept verbatim in [`Other`](Self::Other). Equality ignores ASCII case,
/// so `Other("dynamic")` equals `Other("Dynamic")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Apex alias record.
    Aname,
    /// Certificate Authority Authorization record.
    Caa,
    /// Canonical name (alias) record.
    Cname,
    /// Delegation signer record.
    Ds,
    /// HTTPS service binding record.
    Https,
    /// Mail exchange record.
    Mx,
    /// Naming authority pointer record.
    Naptr,
    /// Name server record.
    Ns,
    /// Reverse pointer record.
    Ptr,
    /// Service locator record.
    Srv,
    /// SSH fingerprint record.
    Sshfp,
    /// TLS association record.
    Tlsa,
    /// Text record.
    Txt,
    /// Any other type, as sent by the remote API.
    Other(String),
}

impl RecordType {
    /// Parses a record type name. Never fails: unknown names become [`Other`](Self::Other).
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "ANAME" => Self::Aname,
            "CAA" => Self::Caa,
            "CNAME" => Self::Cname,
            "DS" => Self::Ds,
            "HTTPS" => Self::Https,
            "MX" => Self::Mx,
            "NAPTR" => Self::Naptr,
            "NS" => Self::Ns,
            "PTR" => Self::Ptr,
            "SRV" => Self::Srv,
            "SSHFP" => Self::Sshfp,
            "TLSA" => Self::Tlsa,
            "TXT" => Self::Txt,
            _ => Self::Other(name.to_string()),
        }
    }

    /// Returns the wire name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Aname => "ANAME",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Ds => "DS",
            Self::Https => "HTTPS",
            Self::Mx => "MX",
            Self::Naptr => "NAPTR",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Srv => "SRV",
            Self::Sshfp => "SSHFP",
            Self::Tlsa => "TLSA",
            Self::Txt => "TXT",
            Self::Other(name) => name,
        }
    }

    /// Whether this is an SRV record, which carries priority/weight/port.
    pub fn is_srv(&self) -> bool {
        matches!(self, Self::Srv)
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

impl Eq for RecordType {}

impl std::hash::Hash for RecordType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for byte in self.as_str().bytes() {
            byte.to_ascii_uppercase().hash(state);
        }
    }
}

impl From<String> for RecordType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for RecordType {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DNS record in the canonical, provider-agnostic shape.
///
/// `priority`, `weight` and `port` are only populated for SRV records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Opaque identifier assigned by the remote service.
    pub id: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Fully-qualified record name (e.g. `"www.example.com"`).
    pub name: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Record content.
    pub content: String,
    /// SRV priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// SRV weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    /// SRV port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

// ============ Filtering ============

/// Criteria used to narrow a list of records.
///
/// Every field that is `Some` must equal the corresponding record field exactly;
/// `None` fields are wildcards. The default filter matches every record.
///
/// `name` may be relative (`"www"`, `"@"`) or fully qualified; it is qualified
/// with the zone before comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    /// Record type to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
    /// Record name to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Content to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// SRV priority to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// SRV weight to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    /// SRV port to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl RecordFilter {
    /// Filter on type and name, as used to resolve a record for update.
    pub fn by_type_and_name(record_type: Option<RecordType>, name: Option<String>) -> Self {
        Self {
            record_type,
            name,
            ..Self::default()
        }
    }

    /// Whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `record` satisfies every criterion, with names qualified against `zone`.
    pub fn matches(&self, record: &Record, zone: &str) -> bool {
        self.record_type
            .as_ref()
            .is_none_or(|t| *t == record.record_type)
            && self
                .name
                .as_ref()
                .is_none_or(|n| full_name(n, zone) == record.name)
            && self.content.as_ref().is_none_or(|c| *c == record.content)
            && self.priority.is_none_or(|p| Some(p) == record.priority)
            && self.weight.is_none_or(|w| Some(w) == record.weight)
            && self.port.is_none_or(|p| Some(p) == record.port)
    }

    /// Keeps the records that match, preserving their order.
    pub fn apply(&self, records: Vec<Record>, zone: &str) -> Vec<Record> {
        records
            .into_iter()
            .filter(|record| self.matches(record, zone))
            .collect()
    }
}

// ============ Requests ============

/// Request to create a new DNS record.
///
/// For SRV records `priority`, `weight` and `port` are all required;
/// for other types they are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    /// Record type.
    pub record_type: RecordType,
    /// Record name, relative to the zone or fully qualified.
    pub name: String,
    /// Record content.
    pub content: String,
    /// SRV priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// SRV weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    /// SRV port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl CreateRecordRequest {
    /// Create a request for a record without SRV fields.
    pub fn new(
        record_type: impl Into<RecordType>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            record_type: record_type.into(),
            name: name.into(),
            content: content.into(),
            priority: None,
            weight: None,
            port: None,
        }
    }

    /// Create an SRV request with its priority/weight/port triple.
    pub fn srv(
        name: impl Into<String>,
        content: impl Into<String>,
        priority: u16,
        weight: u16,
        port: u16,
    ) -> Self {
        Self {
            priority: Some(priority),
            weight: Some(weight),
            port: Some(port),
            ..Self::new(RecordType::Srv, name, content)
        }
    }

    /// Build a request from loosely typed string arguments, as a host CLI delivers them.
    ///
    /// Keys: `type`, `name`, `content` (required) and `priority`, `weight`, `port`
    /// (optional). Numeric fields must parse as unsigned 16-bit integers.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidParameter`] if a required key is missing
    /// or a numeric field is not an integer in range.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        let required = |key: &str| {
            map.get(key)
                .cloned()
                .ok_or_else(|| ProviderError::InvalidParameter {
                    provider: PROVIDER_ID.to_string(),
                    param: key.to_string(),
                    detail: "missing required value".to_string(),
                })
        };

        Ok(Self {
            record_type: RecordType::parse(&required("type")?),
            name: required("name")?,
            content: required("content")?,
            priority: parse_srv_field(map, "priority")?,
            weight: parse_srv_field(map, "weight")?,
            port: parse_srv_field(map, "port")?,
        })
    }

    /// Returns the SRV triple, failing if any member is missing.
    pub(crate) fn srv_triple(&self) -> Result<(u16, u16, u16)> {
        match (self.priority, self.weight, self.port) {
            (Some(priority), Some(weight), Some(port)) => Ok((priority, weight, port)),
            _ => Err(ProviderError::InvalidParameter {
                provider: PROVIDER_ID.to_string(),
                param: "priority, weight, port".to_string(),
                detail: "priority, weight and port are required to create SRV records"
                    .to_string(),
            }),
        }
    }
}

/// Parse an optional SRV field from string input.
fn parse_srv_field(map: &HashMap<String, String>, key: &str) -> Result<Option<u16>> {
    let Some(raw) = map.get(key) else {
        return Ok(None);
    };

    raw.trim()
        .parse::<u16>()
        .map(Some)
        .map_err(|e| ProviderError::InvalidParameter {
            provider: PROVIDER_ID.to_string(),
            param: key.to_string(),
            detail: format!("expected an integer between 0 and 65535, got '{raw}': {e}"),
        })
}

/// Request to change the content of an existing record.
///
/// When `identifier` is absent the record is resolved from `record_type` and `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordRequest {
    /// Remote record identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Record type, used for resolution and the SRV check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
    /// Record name, used for resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Request to delete a record.
///
/// When `identifier` is absent the record is resolved from `record_type`, `name`
/// and `content`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecordRequest {
    /// Remote record identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Record type to resolve by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
    /// Record name to resolve by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Record content to resolve by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

// ============ Results ============

/// Outcome of a create or update call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResult {
    /// Identifier of the affected record, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    /// The `result` payload returned by the remote API.
    pub raw: serde_json::Value,
}

// ============ Provider Metadata Types ============

/// The input type of a configuration option (affects UI rendering).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Masked/password input.
    Password,
}

/// Definition of a single configuration option accepted by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOption {
    /// Machine-readable option key (e.g., `"auth_token"`).
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Input type for UI rendering.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Optional help/description text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// Static metadata describing a DNS provider.
///
/// Obtain via [`DnsProvider::metadata()`](crate::DnsProvider::metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider identifier.
    pub id: String,
    /// Human-readable provider name.
    pub name: String,
    /// Short description of the provider.
    pub description: String,
    /// Nameservers a domain must delegate to for this provider to serve it.
    pub nameservers: Vec<String>,
    /// Configuration options the provider accepts.
    pub options: Vec<ProviderOption>,
}
