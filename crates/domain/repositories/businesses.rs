use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::businesses::{BusinessEntity, UpdateBusinessEntity},
    value_objects::enums::{business_statuses::BusinessStatus, plan_tiers::PlanTier},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdateOutcome {
    Updated(BusinessEntity),
    /// The regenerated slug collides with another business.
    DuplicateSlug,
    NotFound,
}

#[async_trait]
#[automock]
pub trait BusinessRepository {
    async fn find_by_id(&self, business_id: Uuid) -> Result<Option<BusinessEntity>>;

    async fn find_by_ids(&self, business_ids: Vec<Uuid>) -> Result<Vec<BusinessEntity>>;

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<BusinessEntity>>;

    async fn find_active_by_slug(&self, slug: String) -> Result<Option<BusinessEntity>>;

    async fn update_profile(
        &self,
        business_id: Uuid,
        changes: UpdateBusinessEntity,
    ) -> Result<ProfileUpdateOutcome>;

    async fn set_plan(&self, business_id: Uuid, plan: PlanTier) -> Result<Option<BusinessEntity>>;

    async fn set_status(
        &self,
        business_id: Uuid,
        status: BusinessStatus,
    ) -> Result<Option<BusinessEntity>>;
}
