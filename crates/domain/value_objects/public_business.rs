use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    entities::{business_images::BusinessImageEntity, businesses::BusinessEntity},
    value_objects::{
        businesses::SocialLink,
        enums::plan_tiers::PlanTier,
        gallery::GalleryImageDto,
        plans::{Capability, CapabilityGate},
    },
};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PublicAddressDto {
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// Public listing. Sections the plan does not unlock are omitted from the JSON entirely.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PublicBusinessDto {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub featured: bool,
    pub verified: bool,
    pub premium: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Vec<SocialLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<PublicAddressDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<GalleryImageDto>>,
}

/// Decides what of a stored business the public may see. Pure; stored values are untouched.
pub fn project_public_business(
    gate: &CapabilityGate,
    business: BusinessEntity,
    gallery: Vec<BusinessImageEntity>,
) -> PublicBusinessDto {
    let plan = business.plan;
    let has = |capability| gate.has(plan, capability);

    let address = has(Capability::AddressMap).then(|| PublicAddressDto {
        street: business.street.clone(),
        number: business.number.clone(),
        complement: business.complement.clone(),
        neighborhood: business.neighborhood.clone(),
        city: business.city.clone(),
        state: business.state.clone(),
        zip_code: business.zip_code.clone(),
    });

    PublicBusinessDto {
        id: business.id,
        category_id: business.category_id,
        name: business.name,
        slug: business.slug,
        short_description: business.short_description,
        phone: business.phone,
        whatsapp: business.whatsapp,
        email: business.email,
        website: business.website,
        instagram: business.instagram,
        facebook: business.facebook,
        featured: business.featured,
        verified: has(Capability::VerifiedBadge),
        premium: plan == PlanTier::Premium,
        description: business.description.filter(|_| has(Capability::Description)),
        tags: has(Capability::Tags).then_some(business.tags),
        social_links: has(Capability::SocialLinks).then_some(business.social_links),
        address,
        gallery: has(Capability::Gallery)
            .then(|| gallery.into_iter().map(GalleryImageDto::from).collect()),
    }
}
