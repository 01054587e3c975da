//! Generic HTTP client tools
//!
//! Reusable request execution for providers: sending, logging, status checks and
//! response reading. Each provider builds its own `RequestBuilder` (URL, headers,
//! body) and hands it over here.
//!
//! Requests are sent exactly once. A transport failure or a non-2xx status
//! fails the call; retrying is left to the caller.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (including URL, headers, body, etc.)
    /// * `provider_name` - Provider name (for logging)
    /// * `method_name` - request method name (such as "GET", "POST", used for logs)
    /// * `url_or_action` - URL or Action name (for logging)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` - 2xx status code and response text
    /// * `Err(ProviderError::NetworkError | Timeout)` - transport failure
    /// * `Err(ProviderError::RateLimited | HttpStatus)` - non-2xx status
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        // Extract Retry-After header (before consuming response body)
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        if let Some(err) = status_error(provider_name, status_code, retry_after, &response_text) {
            log::warn!("[{provider_name}] {err}");
            return Err(err);
        }

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ProviderError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

/// Map a non-2xx status to an error. Returns `None` for success statuses.
fn status_error(
    provider_name: &str,
    status_code: u16,
    retry_after: Option<u64>,
    body: &str,
) -> Option<ProviderError> {
    match status_code {
        200..=299 => None,
        429 => Some(ProviderError::RateLimited {
            provider: provider_name.to_string(),
            retry_after,
            raw_message: Some(body.to_string()),
        }),
        _ => Some(ProviderError::HttpStatus {
            provider: provider_name.to_string(),
            status: status_code,
            body: truncate_for_log(body),
        }),
    }
}
