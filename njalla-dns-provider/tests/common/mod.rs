//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use httpmock::Mock;
use httpmock::prelude::*;
use serde_json::{Value, json};

use njalla_dns_provider::{
    DnsProvider, NjallaConfig, NjallaProvider, OperationEvent, OperationObserver,
};

pub const TEST_DOMAIN: &str = "example.com";
pub const TEST_TOKEN: &str = "test-token";

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

// ============ Mock server ============

/// 指向 mock server 的配置
pub fn test_config(server: &MockServer) -> NjallaConfig {
    NjallaConfig::new(TEST_DOMAIN)
        .with_auth_token(TEST_TOKEN)
        .with_api_endpoint(server.url("/"))
}

/// Mock 一个返回 `{"result": result}` 的 RPC 方法
pub async fn mock_rpc<'a>(server: &'a MockServer, method: &str, result: Value) -> Mock<'a> {
    mock_partial(server, json!({ "method": method }), result).await
}

/// Mock 一个 RPC 方法，只匹配包含 `params` 的请求
pub async fn mock_rpc_with_params<'a>(
    server: &'a MockServer,
    method: &str,
    params: Value,
    result: Value,
) -> Mock<'a> {
    mock_partial(server, json!({ "method": method, "params": params }), result).await
}

async fn mock_partial<'a>(server: &'a MockServer, partial: Value, result: Value) -> Mock<'a> {
    let partial = partial.to_string();
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .header("authorization", format!("Njalla {TEST_TOKEN}"))
                .json_body_partial(partial);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "result": result }));
        })
        .await
}

/// Mock 一个返回 error 信封的 RPC 方法
pub async fn mock_rpc_error<'a>(
    server: &'a MockServer,
    method: &str,
    code: i64,
    message: &str,
) -> Mock<'a> {
    let partial = json!({ "method": method }).to_string();
    let body = json!({ "error": { "code": code, "message": message } });
    server
        .mock_async(|when, then| {
            when.method(POST).path("/").json_body_partial(partial);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(body);
        })
        .await
}

/// 完成认证的 provider
pub async fn authenticated_provider(server: &MockServer) -> NjallaProvider {
    authenticated_with(server, NjallaProvider::builder(test_config(server))).await
}

/// 用给定 builder 构建并完成认证
pub async fn authenticated_with(
    server: &MockServer,
    builder: njalla_dns_provider::NjallaProviderBuilder,
) -> NjallaProvider {
    mock_rpc(server, "get-domain", json!({ "name": TEST_DOMAIN })).await;
    let provider = builder.build().expect("构建 provider 失败");
    provider.authenticate().await.expect("认证失败");
    provider
}

/// Njalla `list-records` 中的一条记录
pub fn record_json(id: u64, name: &str, record_type: &str, content: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": record_type,
        "content": content,
        "ttl": 60,
    })
}

// ============ Observer ============

/// 记录所有事件的 observer
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<OperationEvent>>>);

impl EventLog {
    pub fn events(&self) -> Vec<OperationEvent> {
        self.0.lock().unwrap().clone()
    }
}

impl OperationObserver for EventLog {
    fn on_event(&self, event: &OperationEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}
