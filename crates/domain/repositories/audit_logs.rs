use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::audit_logs::InsertAuditLogEntity;

#[async_trait]
#[automock]
pub trait AuditLogRepository {
    async fn record(&self, insert_audit_log_entity: InsertAuditLogEntity) -> Result<()>;
}
