use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::{
        businesses::BusinessEntity,
        highlights::{EditHighlightEntity, HighlightEntity},
    },
    value_objects::{
        enums::{highlight_statuses::HighlightStatus, highlight_types::HighlightType},
        highlight_lifecycle::HighlightPhase,
    },
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestHighlightModel {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApproveHighlightModel {
    pub days: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RejectHighlightModel {
    pub notes: Option<String>,
}

/// Administrator-curated highlight, stored as already approved.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHighlightModel {
    pub business_id: Uuid,
    #[serde(rename = "type", default)]
    pub highlight_type: HighlightType,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_active")]
    pub active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

/// Partial admin edit. For nullable fields, an explicit `null` clears the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditHighlightModel {
    #[serde(rename = "type")]
    pub highlight_type: Option<HighlightType>,
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub subtitle: Option<Option<String>>,
    pub sort_order: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub starts_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub ends_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub admin_notes: Option<Option<String>>,
}

impl EditHighlightModel {
    pub fn is_empty(&self) -> bool {
        self.clone().into_changeset() == EditHighlightEntity::default()
    }

    pub fn into_changeset(self) -> EditHighlightEntity {
        EditHighlightEntity {
            type_: self.highlight_type.map(|t| t.to_string()),
            active: self.active,
            title: self.title,
            subtitle: self.subtitle,
            sort_order: self.sort_order,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            admin_notes: self.admin_notes,
        }
    }
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HighlightListFilter {
    pub status: Option<HighlightStatus>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HighlightDto {
    pub id: Uuid,
    pub business_id: Uuid,
    #[serde(rename = "type")]
    pub highlight_type: HighlightType,
    pub status: HighlightStatus,
    pub phase: HighlightPhase,
    pub active: bool,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub sort_order: i32,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub requested_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub admin_notes: Option<String>,
}

impl HighlightDto {
    pub fn new(highlight: HighlightEntity, now: DateTime<Utc>) -> Self {
        Self {
            phase: HighlightPhase::of(&highlight, now),
            highlight_type: highlight.highlight_type(),
            status: highlight.status(),
            id: highlight.id,
            business_id: highlight.business_id,
            active: highlight.active,
            title: highlight.title,
            subtitle: highlight.subtitle,
            sort_order: highlight.sort_order,
            starts_at: highlight.starts_at,
            ends_at: highlight.ends_at,
            requested_at: highlight.requested_at,
            reviewed_at: highlight.reviewed_at,
            admin_notes: highlight.admin_notes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MyHighlightsDto {
    pub can_request: bool,
    pub has_outstanding_request: bool,
    pub highlights: Vec<HighlightDto>,
}

/// Homepage slide or card.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PublicHighlightDto {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub highlight_type: HighlightType,
    pub business_id: Uuid,
    pub business_slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub sort_order: i32,
}

impl PublicHighlightDto {
    pub fn new(highlight: &HighlightEntity, business: &BusinessEntity) -> Self {
        Self {
            id: highlight.id,
            highlight_type: highlight.highlight_type(),
            business_id: business.id,
            business_slug: business.slug.clone(),
            title: non_blank(&highlight.title).unwrap_or_else(|| business.name.clone()),
            subtitle: non_blank(&highlight.subtitle)
                .or_else(|| non_blank(&business.short_description)),
            sort_order: highlight.sort_order,
        }
    }
}

pub(crate) fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
