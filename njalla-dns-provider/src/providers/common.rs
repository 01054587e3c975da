//! Provider 公共工具函数

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(provider: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::InvalidConfig {
            provider: provider.to_string(),
            detail: format!("failed to create HTTP client: {e}"),
        })
}

// ============ 域名名称处理 ============

/// 去掉域名末尾的点
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// 将记录名称转换为完整域名
/// 如: "www" + "example.com" -> "www.example.com"
/// 如: "@" + "example.com" -> "example.com"
/// 如: "www.example.com." + "example.com" -> "www.example.com"
pub fn full_name(name: &str, zone_name: &str) -> String {
    let zone = normalize_domain_name(zone_name);
    let name = normalize_domain_name(name);

    if name.is_empty() || name == "@" {
        zone
    } else if name == zone || name.ends_with(&format!(".{zone}")) {
        name
    } else {
        format!("{name}.{zone}")
    }
}

/// 将完整域名转换为相对名称，zone 之外的名称原样返回
/// 如: "www.example.com" + "example.com" -> "www"
/// 如: "example.com" + "example.com" -> "@"
pub fn relative_name(name: &str, zone_name: &str) -> String {
    let zone = normalize_domain_name(zone_name);
    let name = normalize_domain_name(name);

    if name.is_empty() || name == zone {
        "@".to_string()
    } else if let Some(subdomain) = name.strip_suffix(&format!(".{zone}")) {
        subdomain.to_string()
    } else {
        name
    }
}
