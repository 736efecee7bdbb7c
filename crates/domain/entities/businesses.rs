use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::value_objects::{
        businesses::SocialLink,
        enums::{business_statuses::BusinessStatus, plan_tiers::PlanTier},
    },
    infra::db::postgres::schema::businesses,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BusinessEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub social_links: Vec<SocialLink>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub plan: PlanTier,
    pub featured: bool,
    pub status: BusinessStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw row used for Diesel queries. Tags and social links stay as JSON until converted.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = businesses)]
pub struct BusinessRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub tags: serde_json::Value,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub social_links: serde_json::Value,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub plan: String,
    pub featured: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BusinessRow> for BusinessEntity {
    fn from(value: BusinessRow) -> Self {
        let tags = serde_json::from_value(value.tags).unwrap_or_default();
        let social_links = serde_json::from_value(value.social_links).unwrap_or_default();

        Self {
            id: value.id,
            owner_id: value.owner_id,
            category_id: value.category_id,
            name: value.name,
            slug: value.slug,
            short_description: value.short_description,
            description: value.description,
            tags,
            phone: value.phone,
            whatsapp: value.whatsapp,
            email: value.email,
            website: value.website,
            instagram: value.instagram,
            facebook: value.facebook,
            social_links,
            street: value.street,
            number: value.number,
            complement: value.complement,
            neighborhood: value.neighborhood,
            city: value.city,
            state: value.state,
            zip_code: value.zip_code,
            plan: PlanTier::from_str(&value.plan),
            featured: value.featured,
            status: BusinessStatus::from_str(&value.status),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Effective profile field set written back after capability gating.
/// Every column is written, so `None` clears a nullable column.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = businesses, treat_none_as_null = true)]
pub struct UpdateBusinessEntity {
    pub category_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub tags: serde_json::Value,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub social_links: serde_json::Value,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub updated_at: DateTime<Utc>,
}
