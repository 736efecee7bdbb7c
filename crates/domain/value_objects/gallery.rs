use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::business_images::BusinessImageEntity;

/// Registers an image the upload service has already stored.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterGalleryImageModel {
    pub url: String,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GalleryImageDto {
    pub id: Uuid,
    pub url: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl From<BusinessImageEntity> for GalleryImageDto {
    fn from(value: BusinessImageEntity) -> Self {
        Self {
            id: value.id,
            url: value.url,
            sort_order: value.sort_order,
            created_at: value.created_at,
        }
    }
}
