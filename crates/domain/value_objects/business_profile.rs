use chrono::{DateTime, Utc};

use crate::domain::{
    entities::businesses::{BusinessEntity, UpdateBusinessEntity},
    value_objects::{
        businesses::{SocialLink, UpdateBusinessProfileModel},
        enums::business_statuses::BusinessStatus,
        plans::{Capability, CapabilityGate},
        slug::slugify,
    },
};

/// Result of gating a profile update: the full field set to persist plus what was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizedProfileUpdate {
    pub changes: UpdateBusinessEntity,
    pub ignored_fields: Vec<&'static str>,
    pub dropped_social_links: usize,
}

/// Merges a client payload into the stored record according to the business's plan.
///
/// Locked fields, and a name with nothing to slug, keep their stored value and are reported in
/// `ignored_fields`. Nothing here returns an error.
#[derive(Debug, Clone)]
pub struct FieldAuthorizer {
    gate: CapabilityGate,
}

impl FieldAuthorizer {
    pub fn new(gate: CapabilityGate) -> Self {
        Self { gate }
    }

    pub fn authorize(
        &self,
        current: &BusinessEntity,
        payload: UpdateBusinessProfileModel,
        now: DateTime<Utc>,
    ) -> AuthorizedProfileUpdate {
        let plan = current.plan;
        let mut ignored_fields = Vec::new();
        let mut dropped_social_links = 0;

        let (name, slug) = match payload.name.as_deref().map(str::trim) {
            Some(name) => {
                let slug = slugify(name);
                if slug.is_empty() {
                    ignored_fields.push("name");
                    (current.name.clone(), current.slug.clone())
                } else {
                    (name.to_string(), slug)
                }
            }
            None => (current.name.clone(), current.slug.clone()),
        };

        let description = match payload.description {
            Some(value) if self.gate.has(plan, Capability::Description) => clean(value),
            Some(_) => {
                ignored_fields.push("description");
                current.description.clone()
            }
            None => current.description.clone(),
        };

        let tags = match payload.tags {
            Some(tags) if self.gate.has(plan, Capability::Tags) => tags
                .into_iter()
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
            Some(_) => {
                ignored_fields.push("tags");
                current.tags.clone()
            }
            None => current.tags.clone(),
        };

        let social_links: Vec<SocialLink> = match payload.social_links {
            Some(mut links) if self.gate.has(plan, Capability::SocialLinks) => {
                let max = self.gate.limits(plan).social_links;
                if links.len() > max {
                    dropped_social_links = links.len() - max;
                    links.truncate(max);
                }
                links
            }
            Some(_) => {
                ignored_fields.push("social_links");
                current.social_links.clone()
            }
            None => current.social_links.clone(),
        };

        let address_supplied = payload.street.is_some()
            || payload.number.is_some()
            || payload.complement.is_some()
            || payload.neighborhood.is_some()
            || payload.city.is_some()
            || payload.state.is_some()
            || payload.zip_code.is_some();

        // The address group moves as a unit: every sub-field takes the payload value or none do.
        let address_unlocked = address_supplied && self.gate.has(plan, Capability::AddressMap);
        if address_supplied && !address_unlocked {
            ignored_fields.push("address");
        }
        let address = |incoming: Option<String>, stored: &Option<String>| {
            if address_unlocked {
                incoming.and_then(clean)
            } else {
                stored.clone()
            }
        };

        let category_id = match payload.category_id {
            Some(category_id) if current.status == BusinessStatus::Pending => Some(category_id),
            Some(_) => {
                ignored_fields.push("category_id");
                current.category_id
            }
            None => current.category_id,
        };

        let changes = UpdateBusinessEntity {
            category_id,
            name,
            slug,
            short_description: merge(payload.short_description, &current.short_description),
            description,
            tags: serde_json::json!(tags),
            phone: merge(payload.phone, &current.phone),
            whatsapp: merge(payload.whatsapp, &current.whatsapp),
            email: merge(payload.email, &current.email),
            website: merge(payload.website, &current.website),
            instagram: merge(payload.instagram, &current.instagram),
            facebook: merge(payload.facebook, &current.facebook),
            social_links: serde_json::json!(social_links),
            street: address(payload.street, &current.street),
            number: address(payload.number, &current.number),
            complement: address(payload.complement, &current.complement),
            neighborhood: address(payload.neighborhood, &current.neighborhood),
            city: address(payload.city, &current.city),
            state: address(payload.state, &current.state),
            zip_code: address(payload.zip_code, &current.zip_code),
            updated_at: now,
        };

        AuthorizedProfileUpdate {
            changes,
            ignored_fields,
            dropped_social_links,
        }
    }
}

fn clean(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn merge(incoming: Option<String>, stored: &Option<String>) -> Option<String> {
    match incoming {
        Some(value) => clean(value),
        None => stored.clone(),
    }
}
