use std::sync::Arc;

use crates::domain::{
    clock::Clock,
    entities::businesses::BusinessEntity,
    repositories::businesses::{BusinessRepository, ProfileUpdateOutcome},
    value_objects::{
        business_profile::FieldAuthorizer,
        businesses::{BusinessDto, UpdateBusinessProfileModel, UpdateBusinessProfileResponse},
        plans::CapabilityGate,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BusinessProfileError {
    #[error("business not found")]
    NotFound,
    #[error("another business already uses this name")]
    DuplicateName,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BusinessProfileError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            BusinessProfileError::NotFound => StatusCode::NOT_FOUND,
            BusinessProfileError::DuplicateName => StatusCode::CONFLICT,
            BusinessProfileError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, BusinessProfileError>;

pub struct BusinessProfileUseCase<B>
where
    B: BusinessRepository + Send + Sync + 'static,
{
    business_repo: Arc<B>,
    gate: CapabilityGate,
    authorizer: FieldAuthorizer,
    clock: Arc<dyn Clock>,
}

impl<B> BusinessProfileUseCase<B>
where
    B: BusinessRepository + Send + Sync + 'static,
{
    pub fn new(business_repo: Arc<B>, gate: CapabilityGate, clock: Arc<dyn Clock>) -> Self {
        Self {
            business_repo,
            authorizer: FieldAuthorizer::new(gate.clone()),
            gate,
            clock,
        }
    }

    pub async fn get_my_business(&self, owner_id: Uuid) -> UseCaseResult<BusinessDto> {
        let business = self.business_of_owner(owner_id).await?;
        Ok(self.to_dto(business))
    }

    /// Applies what the plan allows and reports the rest. Locked fields never fail the request.
    pub async fn update_profile(
        &self,
        owner_id: Uuid,
        update_business_profile_model: UpdateBusinessProfileModel,
    ) -> UseCaseResult<UpdateBusinessProfileResponse> {
        let current = self.business_of_owner(owner_id).await?;
        let business_id = current.id;

        let authorized =
            self.authorizer
                .authorize(&current, update_business_profile_model, self.clock.now());

        if !authorized.ignored_fields.is_empty() {
            info!(
                %business_id,
                plan = %current.plan,
                ignored_fields = ?authorized.ignored_fields,
                "business_profile: fields locked by plan were ignored"
            );
        }
        if authorized.dropped_social_links > 0 {
            info!(
                %business_id,
                dropped = authorized.dropped_social_links,
                "business_profile: social links truncated to plan limit"
            );
        }

        let outcome = self
            .business_repo
            .update_profile(business_id, authorized.changes)
            .await
            .map_err(|err| {
                error!(%business_id, db_error = ?err, "business_profile: failed to update profile");
                BusinessProfileError::Internal(err)
            })?;

        let updated = match outcome {
            ProfileUpdateOutcome::Updated(business) => business,
            ProfileUpdateOutcome::DuplicateSlug => {
                warn!(%business_id, "business_profile: slug already taken");
                return Err(BusinessProfileError::DuplicateName);
            }
            ProfileUpdateOutcome::NotFound => return Err(BusinessProfileError::NotFound),
        };

        info!(%business_id, "business_profile: profile updated");
        Ok(UpdateBusinessProfileResponse {
            business: self.to_dto(updated),
            ignored_fields: authorized.ignored_fields,
            dropped_social_links: authorized.dropped_social_links,
        })
    }

    async fn business_of_owner(&self, owner_id: Uuid) -> UseCaseResult<BusinessEntity> {
        self.business_repo
            .find_by_owner(owner_id)
            .await
            .map_err(|err| {
                error!(%owner_id, db_error = ?err, "business_profile: failed to load business");
                BusinessProfileError::Internal(err)
            })?
            .ok_or(BusinessProfileError::NotFound)
    }

    fn to_dto(&self, business: BusinessEntity) -> BusinessDto {
        let capabilities = self.gate.capabilities(business.plan).clone();
        let limits = self.gate.limits(business.plan);
        BusinessDto::new(business, capabilities, limits)
    }
}
