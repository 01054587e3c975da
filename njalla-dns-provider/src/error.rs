use serde::{Deserialize, Serialize};

/// Unified error type for all provider operations.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Categories
///
/// - Authentication: [`InvalidCredentials`](Self::InvalidCredentials)
/// - Configuration: [`MissingCredential`](Self::MissingCredential),
///   [`InvalidConfig`](Self::InvalidConfig)
/// - Validation: [`InvalidParameter`](Self::InvalidParameter),
///   [`Unsupported`](Self::Unsupported)
/// - Resolution: [`AmbiguousRecord`](Self::AmbiguousRecord)
/// - Remote protocol: [`ApiError`](Self::ApiError), [`HttpStatus`](Self::HttpStatus),
///   [`RateLimited`](Self::RateLimited)
/// - Transport: [`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout)
///
/// No variant is retried by the provider. A failed remote call fails the whole operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The remote endpoint answered with a non-2xx HTTP status.
    HttpStatus {
        /// Provider that produced the error.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for display.
        body: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds, if provided by the API.
        retry_after: Option<u64>,
        /// Original response body, if available.
        raw_message: Option<String>,
    },

    /// Authentication against the configured domain failed.
    ///
    /// Covers transport failures during the lookup, remote errors, a missing credential
    /// and a registered name that differs from the configured domain.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Underlying reason, if available.
        raw_message: Option<String>,
    },

    /// A required configuration option (the API credential) is absent or blank.
    MissingCredential {
        /// Provider that produced the error.
        provider: String,
        /// Name of the missing option.
        option: String,
    },

    /// The provider configuration is invalid.
    InvalidConfig {
        /// Provider that produced the error.
        provider: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// A record operation was attempted before `authenticate()` succeeded.
    NotAuthenticated {
        /// Provider that produced the error.
        provider: String,
    },

    /// A request parameter is invalid or missing.
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The operation is not implemented for this provider or record type.
    Unsupported {
        /// Provider that produced the error.
        provider: String,
        /// Operation that was refused (e.g. `"update_record"`).
        operation: String,
        /// Description of the limitation.
        detail: String,
    },

    /// Identifier resolution did not find exactly one record.
    AmbiguousRecord {
        /// Provider that produced the error.
        provider: String,
        /// Number of records that matched the filter.
        matches: usize,
    },

    /// The remote API returned an `error` envelope.
    ApiError {
        /// Provider that produced the error.
        provider: String,
        /// Numeric error code from the API.
        error_code: i64,
        /// Error message from the API.
        message: String,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::MissingCredential { .. }
                | Self::InvalidConfig { .. }
                | Self::NotAuthenticated { .. }
                | Self::InvalidParameter { .. }
                | Self::Unsupported { .. }
                | Self::AmbiguousRecord { .. }
                | Self::ApiError { .. }
        )
    }

    /// Returns the match count when this error comes from identifier resolution.
    pub fn ambiguous_matches(&self) -> Option<usize> {
        match self {
            Self::AmbiguousRecord { matches, .. } => Some(*matches),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::HttpStatus {
                provider,
                status,
                body,
            } => {
                if body.is_empty() {
                    write!(f, "[{provider}] HTTP {status}")
                } else {
                    write!(f, "[{provider}] HTTP {status}: {body}")
                }
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Authentication failed: {msg}")
                } else {
                    write!(f, "[{provider}] Authentication failed")
                }
            }
            Self::MissingCredential { provider, option } => {
                write!(f, "[{provider}] Missing required option '{option}'")
            }
            Self::InvalidConfig { provider, detail } => {
                write!(f, "[{provider}] Invalid configuration: {detail}")
            }
            Self::NotAuthenticated { provider } => {
                write!(f, "[{provider}] Provider is not authenticated")
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::Unsupported {
                provider,
                operation,
                detail,
            } => {
                write!(f, "[{provider}] {operation} not implemented: {detail}")
            }
            Self::AmbiguousRecord { provider, matches } => {
                write!(
                    f,
                    "[{provider}] Unambiguous record could not be found ({matches} matches)"
                )
            }
            Self::ApiError {
                provider,
                error_code,
                message,
            } => {
                write!(f, "[{provider}] {error_code}: {message}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
