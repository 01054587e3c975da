//! Njalla HTTP 请求方法

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::utils::log_sanitizer::truncate_for_log;

use super::{NJALLA_PROVIDER, NjallaProvider, RpcRequest, RpcResponse};

impl NjallaProvider {
    /// 执行一次 JSON-RPC 调用，返回 `result` 字段
    ///
    /// Sent exactly once. No token means no request at all.
    pub(crate) async fn api_call<P: Serialize>(&self, method: &str, params: &P) -> Result<Value> {
        let token = self
            .config
            .auth_token()
            .ok_or_else(|| ProviderError::MissingCredential {
                provider: NJALLA_PROVIDER.to_string(),
                option: "auth_token".to_string(),
            })?;

        // 1. 序列化请求体
        let payload = serde_json::to_string(&RpcRequest { method, params }).map_err(|e| {
            ProviderError::SerializationError {
                provider: NJALLA_PROVIDER.to_string(),
                detail: e.to_string(),
            }
        })?;

        log::debug!("Request Body: {}", truncate_for_log(&payload));

        // 2. 发送请求
        let request = self
            .client
            .post(&self.config.api_endpoint)
            .header(AUTHORIZATION, format!("Njalla {token}"))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(payload);

        let (_status, response_text) = HttpUtils::execute_request(
            request,
            NJALLA_PROVIDER,
            "POST",
            &format!("method: {method}"),
        )
        .await?;

        // 3. 解析响应
        let response: RpcResponse = HttpUtils::parse_json(&response_text, NJALLA_PROVIDER)?;

        // 4. 处理错误
        if let Some(error) = response.error {
            log::error!("API error: {} - {}", error.code, error.message);
            return Err(ProviderError::ApiError {
                provider: NJALLA_PROVIDER.to_string(),
                error_code: error.code,
                message: error.message,
            });
        }

        // `{"result": null}` 与缺少 result 同样视为空结果
        Ok(response.result.unwrap_or(Value::Null))
    }

    /// 执行 JSON-RPC 调用并把 `result` 解析为 `T`
    pub(crate) async fn call<T: DeserializeOwned, P: Serialize>(
        &self,
        method: &str,
        params: &P,
    ) -> Result<T> {
        let result = self.api_call(method, params).await?;
        serde_json::from_value(result).map_err(|e| {
            log::error!("Unexpected result for {method}: {e}");
            ProviderError::ParseError {
                provider: NJALLA_PROVIDER.to_string(),
                detail: format!("{method}: {e}"),
            }
        })
    }
}
