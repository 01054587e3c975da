use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    CreateRecordRequest, DeleteRecordRequest, MutationResult, ProviderMetadata, Record,
    RecordFilter, UpdateRecordRequest,
};

/// DNS 提供商 Trait
///
/// The contract a host framework drives a provider through. A provider is
/// bound to one domain; [`authenticate`](Self::authenticate) must succeed
/// before any record operation.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 获取 Provider 元数据（类型级别）
    ///
    /// Name, description, nameservers and accepted options.
    /// 此方法不需要实例，可以在创建 Provider 之前调用。
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// Nameservers a domain must delegate to for this provider to serve it.
    fn nameservers() -> Vec<String>
    where
        Self: Sized;

    /// Verify the configured domain against the remote service and bind to it.
    async fn authenticate(&self) -> Result<()>;

    /// 创建 DNS 记录
    async fn create_record(&self, req: &CreateRecordRequest) -> Result<MutationResult>;

    /// 获取 DNS 记录列表，按 `filter` 在本地过滤
    async fn list_records(&self, filter: &RecordFilter) -> Result<Vec<Record>>;

    /// 更新 DNS 记录内容
    async fn update_record(&self, req: &UpdateRecordRequest) -> Result<MutationResult>;

    /// 删除 DNS 记录
    ///
    /// Returns `true` on success, including when no record matched.
    async fn delete_record(&self, req: &DeleteRecordRequest) -> Result<bool>;

    /// Release provider resources. The default does nothing.
    async fn cleanup(&self) -> Result<()> {
        Ok(())
    }
}
