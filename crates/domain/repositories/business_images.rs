use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::business_images::{BusinessImageEntity, InsertBusinessImageEntity};

#[async_trait]
#[automock]
pub trait BusinessImageRepository {
    async fn list_by_business(&self, business_id: Uuid) -> Result<Vec<BusinessImageEntity>>;

    /// Inserts only while the business holds fewer than `max_images`; `None` when full.
    async fn insert_within_limit(
        &self,
        insert_business_image_entity: InsertBusinessImageEntity,
        max_images: i64,
    ) -> Result<Option<BusinessImageEntity>>;

    async fn delete(&self, business_id: Uuid, image_id: Uuid) -> Result<bool>;
}
