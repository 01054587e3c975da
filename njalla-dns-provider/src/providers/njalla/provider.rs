//! Njalla DnsProvider trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::observer::OperationEvent;
use crate::providers::common::{full_name, relative_name};
use crate::traits::DnsProvider;
use crate::types::{
    CreateRecordRequest, DeleteRecordRequest, FieldType, MutationResult, ProviderMetadata,
    ProviderOption, Record, RecordFilter, RecordType, UpdateRecordRequest,
};

use super::{
    AddRecordParams, DEFAULT_TTL, DomainParams, EditRecordParams, NJALLA_NAMESERVERS,
    NJALLA_PROVIDER, NjallaDomain, NjallaProvider, NjallaRecord, RecordListResult,
    RemoveRecordParams, id_from_value, wire_id,
};

impl NjallaProvider {
    /// 将 Njalla 记录转换为 `Record`
    pub(crate) fn to_record(raw: NjallaRecord, zone: &str) -> Record {
        let record_type = RecordType::parse(&raw.record_type);
        // 只有 SRV 记录保留 prio/weight/port
        let (priority, weight, port) = if record_type.is_srv() {
            (raw.prio, raw.weight, raw.port)
        } else {
            (None, None, None)
        };

        Record {
            id: raw.id,
            name: full_name(&raw.name, zone),
            record_type,
            ttl: raw.ttl,
            content: raw.content,
            priority,
            weight,
            port,
        }
    }

    /// 拉取整个 zone 的记录并在本地过滤，返回 (拉取总数, 匹配记录)
    async fn fetch_filtered(
        &self,
        zone: &str,
        filter: &RecordFilter,
    ) -> Result<(usize, Vec<Record>)> {
        let list: RecordListResult = self
            .call("list-records", &DomainParams { domain: zone })
            .await?;

        let fetched = list.records.len();
        let records = list
            .records
            .into_iter()
            .map(|raw| Self::to_record(raw, zone))
            .collect();

        Ok((fetched, filter.apply(records, zone)))
    }

    /// 按条件定位唯一一条记录
    ///
    /// 0 条或多条匹配都返回 `AmbiguousRecord`。
    pub(crate) async fn resolve_record(&self, zone: &str, filter: &RecordFilter) -> Result<Record> {
        let (_, mut matches) = self.fetch_filtered(zone, filter).await?;
        let count = matches.len();

        match (count, matches.pop()) {
            (1, Some(record)) => Ok(record),
            _ => {
                log::debug!("{count} records match {filter:?}");
                Err(ProviderError::AmbiguousRecord {
                    provider: NJALLA_PROVIDER.to_string(),
                    matches: count,
                })
            }
        }
    }

    fn srv_update_unsupported() -> ProviderError {
        ProviderError::Unsupported {
            provider: NJALLA_PROVIDER.to_string(),
            operation: "update_record".to_string(),
            detail: "updating SRV records is not supported".to_string(),
        }
    }
}

#[async_trait]
impl DnsProvider for NjallaProvider {
    fn id(&self) -> &'static str {
        NJALLA_PROVIDER
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: NJALLA_PROVIDER.to_string(),
            name: "Njalla".to_string(),
            description: "Privacy-focused domain registrar with a JSON-RPC DNS API".to_string(),
            nameservers: Self::nameservers(),
            options: vec![ProviderOption {
                key: "auth_token".to_string(),
                label: "API Token".to_string(),
                field_type: FieldType::Password,
                help_text: Some("API token for authentication".to_string()),
            }],
        }
    }

    fn nameservers() -> Vec<String> {
        NJALLA_NAMESERVERS.iter().map(ToString::to_string).collect()
    }

    async fn authenticate(&self) -> Result<()> {
        let domain = self.config.domain.as_str();

        let found: NjallaDomain = self
            .call("get-domain", &DomainParams { domain })
            .await
            .map_err(|e| ProviderError::InvalidCredentials {
                provider: NJALLA_PROVIDER.to_string(),
                raw_message: Some(e.to_string()),
            })?;

        if found.name != domain {
            log::warn!("get-domain returned '{}' for '{domain}'", found.name);
            return Err(ProviderError::InvalidCredentials {
                provider: NJALLA_PROVIDER.to_string(),
                raw_message: Some("Domain not found".to_string()),
            });
        }

        // 重复认证时已设置，忽略
        let _ = self.domain_id.set(found.name);
        self.emit(OperationEvent::Authenticated {
            domain: domain.to_string(),
        });
        Ok(())
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<MutationResult> {
        let (prio, weight, port) = if req.record_type.is_srv() {
            let (prio, weight, port) = req.srv_triple()?;
            (Some(prio), Some(weight), Some(port))
        } else {
            (None, None, None)
        };
        let zone = self.scope()?;
        let name = relative_name(&req.name, zone);

        let params = AddRecordParams {
            domain: zone,
            record_type: req.record_type.as_str(),
            name: &name,
            content: &req.content,
            ttl: self.config.ttl.unwrap_or(DEFAULT_TTL),
            prio,
            weight,
            port,
        };

        let raw = self.api_call("add-record", &params).await?;
        let record_id = raw.get("id").and_then(id_from_value);

        self.emit(OperationEvent::Created {
            record_id: record_id.clone(),
            raw: raw.clone(),
        });
        Ok(MutationResult { record_id, raw })
    }

    async fn list_records(&self, filter: &RecordFilter) -> Result<Vec<Record>> {
        let zone = self.scope()?;
        let (fetched, records) = self.fetch_filtered(zone, filter).await?;

        self.emit(OperationEvent::Listed {
            fetched,
            matched: records.len(),
        });
        Ok(records)
    }

    async fn update_record(&self, req: &UpdateRecordRequest) -> Result<MutationResult> {
        if req.record_type.as_ref().is_some_and(RecordType::is_srv) {
            return Err(Self::srv_update_unsupported());
        }
        let content = req
            .content
            .as_deref()
            .ok_or_else(|| ProviderError::InvalidParameter {
                provider: NJALLA_PROVIDER.to_string(),
                param: "content".to_string(),
                detail: "content is required to update a record".to_string(),
            })?;
        let zone = self.scope()?;

        let record_id = match req.identifier.as_deref() {
            // 按 ID 更新时无法得知记录类型，必须由调用方给出以排除 SRV
            Some(id) if !id.is_empty() && req.record_type.is_none() => {
                return Err(ProviderError::InvalidParameter {
                    provider: NJALLA_PROVIDER.to_string(),
                    param: "record_type".to_string(),
                    detail: "record_type is required when updating by identifier".to_string(),
                });
            }
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let filter =
                    RecordFilter::by_type_and_name(req.record_type.clone(), req.name.clone());
                let record = self.resolve_record(zone, &filter).await?;
                if record.record_type.is_srv() {
                    return Err(Self::srv_update_unsupported());
                }
                record.id
            }
        };

        let params = EditRecordParams {
            id: wire_id(&record_id),
            domain: zone,
            content,
        };
        let raw = self.api_call("edit-record", &params).await?;

        self.emit(OperationEvent::Updated {
            record_id: record_id.clone(),
            raw: raw.clone(),
        });
        Ok(MutationResult {
            record_id: Some(record_id),
            raw,
        })
    }

    async fn delete_record(&self, req: &DeleteRecordRequest) -> Result<bool> {
        let zone = self.scope()?;

        let record_id = match req.identifier.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let filter = RecordFilter {
                    record_type: req.record_type.clone(),
                    name: req.name.clone(),
                    content: req.content.clone(),
                    ..RecordFilter::default()
                };
                match self.resolve_record(zone, &filter).await {
                    Ok(record) => record.id,
                    // 没有匹配的记录：视为已删除
                    Err(e) if e.ambiguous_matches() == Some(0) => {
                        self.emit(OperationEvent::DeleteSkipped);
                        return Ok(true);
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        let params = RemoveRecordParams {
            domain: zone,
            id: wire_id(&record_id),
        };
        self.api_call("remove-record", &params).await?;

        self.emit(OperationEvent::Deleted { record_id });
        Ok(true)
    }
}
