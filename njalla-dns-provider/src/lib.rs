//! # njalla-dns-provider
//!
//! DNS record management for domains hosted at [Njalla](https://njal.la/),
//! exposed through a small provider abstraction a host (certificate client,
//! dynamic-DNS updater, CLI) can drive without knowing the remote protocol.
//!
//! One [`NjallaProvider`] is bound to one domain. It speaks Njalla's JSON-RPC
//! API: every operation is a single POST of `{"method", "params"}` to
//! `https://njal.la/api/1/`, authenticated with `Authorization: Njalla <token>`.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use njalla_dns_provider::{
//!     CreateRecordRequest, DeleteRecordRequest, DnsProvider, NjallaConfig, NjallaProvider,
//!     RecordFilter,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Configure the provider for a domain
//!     let config = NjallaConfig::new("example.com").with_auth_token("your-token");
//!     let provider = NjallaProvider::new(config)?;
//!
//!     // 2. Bind to the domain; required before any record operation
//!     provider.authenticate().await?;
//!
//!     // 3. Create a TXT record (TTL defaults to 60 seconds)
//!     let created = provider
//!         .create_record(&CreateRecordRequest::new("TXT", "_acme-challenge", "token"))
//!         .await?;
//!     println!("created {:?}", created.record_id);
//!
//!     // 4. List records, filtered locally
//!     let filter = RecordFilter {
//!         name: Some("_acme-challenge".to_string()),
//!         ..RecordFilter::default()
//!     };
//!     for record in provider.list_records(&filter).await? {
//!         println!("{} {} -> {}", record.name, record.record_type, record.content);
//!     }
//!
//!     // 5. Delete it again, resolving the id from type/name/content
//!     provider
//!         .delete_record(&DeleteRecordRequest {
//!             record_type: Some("TXT".into()),
//!             name: Some("_acme-challenge".to_string()),
//!             content: Some("token".to_string()),
//!             ..DeleteRecordRequest::default()
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Observing Operations
//!
//! Results are returned to the caller; nothing about record changes is written
//! to a log. To get a side channel, register an [`OperationObserver`]:
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use njalla_dns_provider::*;
//! # fn example() -> Result<()> {
//! let provider = NjallaProvider::builder(NjallaConfig::from_env()?)
//!     .observer(Arc::new(|event: &OperationEvent| println!("{event:?}")))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! Notable variants:
//!
//! - [`ProviderError::InvalidCredentials`]: `authenticate()` failed
//! - [`ProviderError::NotAuthenticated`]: record operation before `authenticate()`
//! - [`ProviderError::AmbiguousRecord`]: id resolution matched zero or several records
//! - [`ProviderError::ApiError`]: the API answered with an `error` object
//!
//! Nothing is retried. See [`ProviderError`] for the full list.

mod config;
mod error;
mod http_client;
mod observer;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

pub use config::{DEFAULT_API_ENDPOINT, NjallaConfig};

pub use observer::{OperationEvent, OperationObserver};

// Re-export core trait
pub use traits::DnsProvider;

// Re-export types
pub use types::{
    CreateRecordRequest, DeleteRecordRequest, FieldType, MutationResult, ProviderMetadata,
    ProviderOption, Record, RecordFilter, RecordType, UpdateRecordRequest,
};

// Re-export name helpers
pub use providers::common::{full_name, normalize_domain_name, relative_name};

pub use providers::{NjallaProvider, NjallaProviderBuilder};
