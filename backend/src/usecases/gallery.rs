use std::sync::Arc;

use crates::domain::{
    clock::Clock,
    entities::{business_images::InsertBusinessImageEntity, businesses::BusinessEntity},
    repositories::{business_images::BusinessImageRepository, businesses::BusinessRepository},
    value_objects::{
        gallery::{GalleryImageDto, RegisterGalleryImageModel},
        plans::{Capability, CapabilityGate},
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use url::Url;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("business not found")]
    BusinessNotFound,
    #[error("image not found")]
    ImageNotFound,
    #[error("current plan does not include {0}")]
    CapabilityDenied(Capability),
    #[error("gallery is full ({0} photos allowed on this plan)")]
    LimitReached(usize),
    #[error("invalid image url: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl GalleryError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            GalleryError::BusinessNotFound | GalleryError::ImageNotFound => StatusCode::NOT_FOUND,
            GalleryError::CapabilityDenied(_) => StatusCode::FORBIDDEN,
            GalleryError::LimitReached(_) | GalleryError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            GalleryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, GalleryError>;

/// Owner-managed photo gallery. Files live in external storage; only URLs are kept here.
pub struct GalleryUseCase<B, I>
where
    B: BusinessRepository + Send + Sync + 'static,
    I: BusinessImageRepository + Send + Sync + 'static,
{
    business_repo: Arc<B>,
    image_repo: Arc<I>,
    gate: CapabilityGate,
    clock: Arc<dyn Clock>,
}

impl<B, I> GalleryUseCase<B, I>
where
    B: BusinessRepository + Send + Sync + 'static,
    I: BusinessImageRepository + Send + Sync + 'static,
{
    pub fn new(
        business_repo: Arc<B>,
        image_repo: Arc<I>,
        gate: CapabilityGate,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            business_repo,
            image_repo,
            gate,
            clock,
        }
    }

    pub async fn list(&self, owner_id: Uuid) -> UseCaseResult<Vec<GalleryImageDto>> {
        let business = self.business_of_owner(owner_id).await?;
        let images = self.image_repo.list_by_business(business.id).await?;

        Ok(images.into_iter().map(GalleryImageDto::from).collect())
    }

    pub async fn register(
        &self,
        owner_id: Uuid,
        register_gallery_image_model: RegisterGalleryImageModel,
    ) -> UseCaseResult<GalleryImageDto> {
        let business = self.business_of_owner(owner_id).await?;
        let business_id = business.id;

        if !self.gate.has(business.plan, Capability::Gallery) {
            warn!(%business_id, plan = %business.plan, "gallery: plan lacks gallery");
            return Err(GalleryError::CapabilityDenied(Capability::Gallery));
        }

        let url = parse_image_url(&register_gallery_image_model.url)?;
        let max_images = self.gate.limits(business.plan).gallery_photos;

        let insert_business_image_entity = InsertBusinessImageEntity {
            business_id,
            url: url.to_string(),
            sort_order: register_gallery_image_model.sort_order,
            created_at: self.clock.now(),
        };

        let image = self
            .image_repo
            .insert_within_limit(insert_business_image_entity, max_images as i64)
            .await
            .map_err(|err| {
                error!(%business_id, db_error = ?err, "gallery: failed to insert image");
                GalleryError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%business_id, max_images, "gallery: photo limit reached");
                GalleryError::LimitReached(max_images)
            })?;

        info!(%business_id, image_id = %image.id, "gallery: image registered");
        Ok(GalleryImageDto::from(image))
    }

    pub async fn remove(&self, owner_id: Uuid, image_id: Uuid) -> UseCaseResult<()> {
        let business = self.business_of_owner(owner_id).await?;

        if !self.image_repo.delete(business.id, image_id).await? {
            return Err(GalleryError::ImageNotFound);
        }

        info!(business_id = %business.id, %image_id, "gallery: image removed");
        Ok(())
    }

    async fn business_of_owner(&self, owner_id: Uuid) -> UseCaseResult<BusinessEntity> {
        self.business_repo
            .find_by_owner(owner_id)
            .await
            .map_err(|err| {
                error!(%owner_id, db_error = ?err, "gallery: failed to load business");
                GalleryError::Internal(err)
            })?
            .ok_or(GalleryError::BusinessNotFound)
    }
}

fn parse_image_url(raw: &str) -> UseCaseResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|err| GalleryError::InvalidUrl(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(GalleryError::InvalidUrl(format!(
            "unsupported scheme {scheme}"
        ))),
    }
}
