use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::business_images;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = business_images)]
pub struct BusinessImageEntity {
    pub id: Uuid,
    pub business_id: Uuid,
    pub url: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = business_images)]
pub struct InsertBusinessImageEntity {
    pub business_id: Uuid,
    pub url: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}
