use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::value_objects::enums::{
        highlight_statuses::HighlightStatus, highlight_types::HighlightType,
    },
    infra::db::postgres::schema::highlights,
};

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = highlights)]
pub struct HighlightEntity {
    pub id: Uuid,
    pub business_id: Uuid,
    pub type_: String, // carousel | card, see value_objects/enums/highlight_types.rs
    pub status: String, // pending | approved | rejected
    pub active: bool,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub sort_order: i32,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub requested_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl HighlightEntity {
    pub fn status(&self) -> HighlightStatus {
        HighlightStatus::from_str(&self.status)
    }

    pub fn highlight_type(&self) -> HighlightType {
        HighlightType::from_str(&self.type_)
    }
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = highlights)]
pub struct InsertHighlightEntity {
    pub business_id: Uuid,
    pub type_: String,
    pub status: String,
    pub active: bool,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub sort_order: i32,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub requested_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Columns touched by an approve/reject transition. `None` leaves the column as is.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = highlights)]
pub struct ReviewHighlightEntity {
    pub status: String,
    pub active: Option<bool>,
    pub starts_at: Option<Option<DateTime<Utc>>>,
    pub ends_at: Option<Option<DateTime<Utc>>>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub admin_notes: Option<Option<String>>,
}

/// Administrator data edit. Never changes `status`.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = highlights)]
pub struct EditHighlightEntity {
    pub type_: Option<String>,
    pub active: Option<bool>,
    pub title: Option<Option<String>>,
    pub subtitle: Option<Option<String>>,
    pub sort_order: Option<i32>,
    pub starts_at: Option<Option<DateTime<Utc>>>,
    pub ends_at: Option<Option<DateTime<Utc>>>,
    pub admin_notes: Option<Option<String>>,
}
