use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::businesses::BusinessEntity,
    value_objects::{
        enums::{business_statuses::BusinessStatus, plan_tiers::PlanTier},
        plans::{CapabilitySet, Limits},
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Client self-service update. Absent fields keep their stored value; a blank string clears
/// a nullable field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateBusinessProfileModel {
    pub name: Option<String>,
    pub short_description: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub social_links: Option<Vec<SocialLink>>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub category_id: Option<Uuid>,
}

/// Owner's view of their own listing, with what their plan unlocks.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BusinessDto {
    pub id: Uuid,
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
    pub capabilities: CapabilitySet,
    pub limits: Limits,
    pub featured: bool,
    pub status: BusinessStatus,
    pub updated_at: DateTime<Utc>,
}

impl BusinessDto {
    pub fn new(business: BusinessEntity, capabilities: CapabilitySet, limits: Limits) -> Self {
        Self {
            id: business.id,
            category_id: business.category_id,
            name: business.name,
            slug: business.slug,
            short_description: business.short_description,
            description: business.description,
            tags: business.tags,
            phone: business.phone,
            whatsapp: business.whatsapp,
            email: business.email,
            website: business.website,
            instagram: business.instagram,
            facebook: business.facebook,
            social_links: business.social_links,
            street: business.street,
            number: business.number,
            complement: business.complement,
            neighborhood: business.neighborhood,
            city: business.city,
            state: business.state,
            zip_code: business.zip_code,
            plan: business.plan,
            capabilities,
            limits,
            featured: business.featured,
            status: business.status,
            updated_at: business.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateBusinessProfileResponse {
    pub business: BusinessDto,
    /// Supplied fields the current plan (or business status) does not allow to change, plus a
    /// name that produces no slug.
    pub ignored_fields: Vec<&'static str>,
    pub dropped_social_links: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetBusinessPlanModel {
    pub plan: PlanTier,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetBusinessStatusModel {
    pub status: BusinessStatus,
}
