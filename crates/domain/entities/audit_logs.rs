use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::audit_logs;

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = audit_logs)]
pub struct InsertAuditLogEntity {
    pub action: String,
    pub business_id: Uuid,
    pub actor_id: Uuid,
    pub created_at: DateTime<Utc>,
}
