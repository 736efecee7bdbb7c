use chrono::{DateTime, Utc};
use crates::domain::{
    entities::audit_logs::InsertAuditLogEntity, repositories::audit_logs::AuditLogRepository,
    value_objects::audit_logs::AuditEntry,
};
use tracing::{debug, warn};

/// Fire-and-forget: an audit failure never fails the operation it describes.
pub async fn record_audit<A>(audit_repo: &A, entry: AuditEntry, now: DateTime<Utc>)
where
    A: AuditLogRepository + Send + Sync + 'static,
{
    let action = entry.action.to_string();
    let insert_audit_log_entity = InsertAuditLogEntity {
        action: action.clone(),
        business_id: entry.business_id,
        actor_id: entry.actor_id,
        created_at: now,
    };

    match audit_repo.record(insert_audit_log_entity).await {
        Ok(()) => debug!(
            action = %action,
            business_id = %entry.business_id,
            actor_id = %entry.actor_id,
            "audit: entry recorded"
        ),
        Err(err) => warn!(
            action = %action,
            business_id = %entry.business_id,
            actor_id = %entry.actor_id,
            db_error = ?err,
            "audit: failed to record entry"
        ),
    }
}
