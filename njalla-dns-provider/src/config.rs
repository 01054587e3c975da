//! Provider configuration.
//!
//! A [`NjallaConfig`] names the domain a provider instance manages and carries
//! the options the host passes in: the API token and an optional TTL override.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::types::PROVIDER_ID;
use crate::utils::log_sanitizer::mask_secret;

/// Default Njalla JSON-RPC endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "https://njal.la/api/1/";

/// Environment variable prefix read by [`NjallaConfig::from_env`].
const ENV_PREFIX: &str = "NJALLA_";

/// Njalla provider configuration.
///
/// # Serialization
///
/// Deserialized from camelCase keys; only `domain` is required:
///
/// ```json
/// { "domain": "example.com", "authToken": "...", "ttl": 300 }
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NjallaConfig {
    /// Domain (zone) this provider instance operates on.
    pub domain: String,
    /// API token sent as `Authorization: Njalla <token>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// TTL for created records. Falls back to 60 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// JSON-RPC endpoint URL.
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
}

fn default_api_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

impl std::fmt::Debug for NjallaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NjallaConfig")
            .field("domain", &self.domain)
            .field("auth_token", &self.auth_token.as_deref().map(mask_secret))
            .field("ttl", &self.ttl)
            .field("api_endpoint", &self.api_endpoint)
            .finish()
    }
}

impl NjallaConfig {
    /// Create a configuration for `domain` with no token and default options.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            auth_token: None,
            ttl: None,
            api_endpoint: default_api_endpoint(),
        }
    }

    /// Set the API token.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Override the TTL used for created records.
    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Override the API endpoint (e.g. to point at a test server).
    #[must_use]
    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into();
        self
    }

    /// The API token, if configured and not blank.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }

    /// Build a configuration from flat key-value options.
    ///
    /// Keys: `domain` (required), `authToken`, `ttl`, `apiEndpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidConfig`] if `domain` is missing or blank,
    /// and [`ProviderError::InvalidParameter`] if `ttl` is not an unsigned integer.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        let domain = match map.get("domain") {
            Some(domain) if !domain.trim().is_empty() => domain.trim().to_string(),
            _ => {
                return Err(ProviderError::InvalidConfig {
                    provider: PROVIDER_ID.to_string(),
                    detail: "option 'domain' is required".to_string(),
                });
            }
        };

        let ttl = map
            .get("ttl")
            .map(|raw| {
                raw.trim()
                    .parse::<u32>()
                    .map_err(|e| ProviderError::InvalidParameter {
                        provider: PROVIDER_ID.to_string(),
                        param: "ttl".to_string(),
                        detail: format!("expected a number of seconds, got '{raw}': {e}"),
                    })
            })
            .transpose()?;

        Ok(Self {
            domain,
            auth_token: map.get("authToken").cloned(),
            ttl,
            api_endpoint: map
                .get("apiEndpoint")
                .cloned()
                .unwrap_or_else(default_api_endpoint),
        })
    }

    /// Build a configuration from `NJALLA_DOMAIN`, `NJALLA_AUTH_TOKEN`,
    /// `NJALLA_TTL` and `NJALLA_API_ENDPOINT`.
    pub fn from_env() -> Result<Self> {
        Self::from_map(&env_options(std::env::vars()))
    }
}

/// Collect `NJALLA_*` variables into the keys understood by [`NjallaConfig::from_map`].
fn env_options(vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    vars.filter_map(|(key, value)| {
        let key = match key.strip_prefix(ENV_PREFIX)? {
            "DOMAIN" => "domain",
            "AUTH_TOKEN" => "authToken",
            "TTL" => "ttl",
            "API_ENDPOINT" => "apiEndpoint",
            _ => return None,
        };
        Some((key.to_string(), value))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn new_uses_defaults() {
        let config = NjallaConfig::new("example.com");
        assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(config.ttl, None);
        assert_eq!(config.auth_token(), None);
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let config = NjallaConfig::new("example.com").with_auth_token("  ");
        assert_eq!(config.auth_token(), None);
    }

    #[test]
    fn from_map_reads_all_options() {
        let config = NjallaConfig::from_map(&map(&[
            ("domain", "example.com"),
            ("authToken", "secret-token"),
            ("ttl", "300"),
            ("apiEndpoint", "http://localhost:8080/"),
        ]))
        .unwrap();

        assert_eq!(config.domain, "example.com");
        assert_eq!(config.auth_token(), Some("secret-token"));
        assert_eq!(config.ttl, Some(300));
        assert_eq!(config.api_endpoint, "http://localhost:8080/");
    }

    #[test]
    fn from_map_requires_domain() {
        let err = NjallaConfig::from_map(&map(&[("authToken", "t")])).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidConfig { .. }));

        let err = NjallaConfig::from_map(&map(&[("domain", " ")])).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidConfig { .. }));
    }

    #[test]
    fn from_map_rejects_bad_ttl() {
        let err =
            NjallaConfig::from_map(&map(&[("domain", "example.com"), ("ttl", "1h")])).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::InvalidParameter { ref param, .. } if param == "ttl"
        ));
    }

    #[test]
    fn env_options_maps_known_variables() {
        let vars = vec![
            ("NJALLA_DOMAIN".to_string(), "example.com".to_string()),
            ("NJALLA_AUTH_TOKEN".to_string(), "t".to_string()),
            ("NJALLA_UNKNOWN".to_string(), "x".to_string()),
            ("PATH".to_string(), "/usr/bin".to_string()),
        ];
        let options = env_options(vars.into_iter());
        assert_eq!(options.len(), 2);
        assert_eq!(options["domain"], "example.com");
        assert_eq!(options["authToken"], "t");
    }

    #[test]
    fn deserialize_camel_case() {
        let config: NjallaConfig =
            serde_json::from_str(r#"{"domain":"example.com","authToken":"t","ttl":120}"#).unwrap();
        assert_eq!(config.ttl, Some(120));
        assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
    }

    #[test]
    fn debug_masks_token() {
        let config = NjallaConfig::new("example.com").with_auth_token("abcdef0123456789");
        let debug = format!("{config:?}");
        assert!(!debug.contains("abcdef0123456789"));
        assert!(debug.contains("abcd****"));
    }
}
