//! Njalla DNS Provider
//!
//! Njalla exposes a single JSON-RPC endpoint. Every call is a POST of
//! `{"method": .., "params": {..}}` answered by `{"result": ..}` or
//! `{"error": {"code": .., "message": ..}}`. The API has no server-side record
//! filtering, so lookups fetch the whole zone and filter locally.

mod http;
mod provider;
mod types;

use std::sync::{Arc, OnceLock};

use reqwest::Client;

use crate::config::NjallaConfig;
use crate::error::{ProviderError, Result};
use crate::observer::{OperationEvent, OperationObserver};
use crate::providers::common::create_http_client;
use crate::types::PROVIDER_ID;

pub(crate) use types::{
    AddRecordParams, DomainParams, EditRecordParams, NjallaDomain, NjallaRecord,
    RecordListResult, RemoveRecordParams, RpcRequest, RpcResponse, id_from_value, wire_id,
};

pub(crate) const NJALLA_PROVIDER: &str = PROVIDER_ID;
/// TTL for created records when the configuration has no override.
pub(crate) const DEFAULT_TTL: u32 = 60;
pub(crate) const NJALLA_NAMESERVERS: [&str; 3] =
    ["1-you.njalla.no", "2-can.njalla.in", "3-get.njalla.fo"];

/// Njalla DNS Provider
pub struct NjallaProvider {
    pub(crate) client: Client,
    pub(crate) config: NjallaConfig,
    /// Domain confirmed by `authenticate()`. Set once.
    pub(crate) domain_id: OnceLock<String>,
    pub(crate) observer: Option<Arc<dyn OperationObserver>>,
}

/// Njalla Provider Builder
pub struct NjallaProviderBuilder {
    config: NjallaConfig,
    client: Option<Client>,
    observer: Option<Arc<dyn OperationObserver>>,
}

impl NjallaProviderBuilder {
    fn new(config: NjallaConfig) -> Self {
        Self {
            config,
            client: None,
            observer: None,
        }
    }

    /// Use a preconfigured HTTP client instead of the default one.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Register an observer that receives an event after each successful operation.
    #[must_use]
    pub fn observer(mut self, observer: Arc<dyn OperationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build(self) -> Result<NjallaProvider> {
        if self.config.domain.trim().is_empty() {
            return Err(ProviderError::InvalidConfig {
                provider: NJALLA_PROVIDER.to_string(),
                detail: "domain must not be empty".to_string(),
            });
        }

        let client = match self.client {
            Some(client) => client,
            None => create_http_client(NJALLA_PROVIDER)?,
        };

        Ok(NjallaProvider {
            client,
            config: self.config,
            domain_id: OnceLock::new(),
            observer: self.observer,
        })
    }
}

impl NjallaProvider {
    pub fn new(config: NjallaConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: NjallaConfig) -> NjallaProviderBuilder {
        NjallaProviderBuilder::new(config)
    }

    /// The configured domain.
    pub fn domain(&self) -> &str {
        &self.config.domain
    }

    /// The domain confirmed by `authenticate()`, if it has succeeded.
    pub fn authenticated_domain(&self) -> Option<&str> {
        self.domain_id.get().map(String::as_str)
    }

    /// The authenticated scope every record operation runs against.
    pub(crate) fn scope(&self) -> Result<&str> {
        self.authenticated_domain()
            .ok_or_else(|| ProviderError::NotAuthenticated {
                provider: NJALLA_PROVIDER.to_string(),
            })
    }

    pub(crate) fn emit(&self, event: OperationEvent) {
        if let Some(observer) = &self.observer {
            observer.on_event(&event);
        }
    }
}
