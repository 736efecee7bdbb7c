use std::sync::Arc;

use crates::domain::{
    clock::Clock,
    entities::businesses::BusinessEntity,
    repositories::{audit_logs::AuditLogRepository, businesses::BusinessRepository},
    value_objects::{
        audit_logs::{AuditAction, AuditEntry},
        businesses::BusinessDto,
        enums::{business_statuses::BusinessStatus, plan_tiers::PlanTier},
        plans::CapabilityGate,
    },
};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::usecases::audit::record_audit;

#[derive(Debug, Error)]
pub enum AdminBusinessError {
    #[error("business not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AdminBusinessError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            AdminBusinessError::NotFound => StatusCode::NOT_FOUND,
            AdminBusinessError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, AdminBusinessError>;

/// Plan and status are only ever changed by an administrator. Stored gated content is kept on a
/// downgrade; the public projection hides it.
pub struct AdminBusinessUseCase<B, A>
where
    B: BusinessRepository + Send + Sync + 'static,
    A: AuditLogRepository + Send + Sync + 'static,
{
    business_repo: Arc<B>,
    audit_repo: Arc<A>,
    gate: CapabilityGate,
    clock: Arc<dyn Clock>,
}

impl<B, A> AdminBusinessUseCase<B, A>
where
    B: BusinessRepository + Send + Sync + 'static,
    A: AuditLogRepository + Send + Sync + 'static,
{
    pub fn new(
        business_repo: Arc<B>,
        audit_repo: Arc<A>,
        gate: CapabilityGate,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            business_repo,
            audit_repo,
            gate,
            clock,
        }
    }

    pub async fn set_plan(
        &self,
        actor_id: Uuid,
        business_id: Uuid,
        plan: PlanTier,
    ) -> UseCaseResult<BusinessDto> {
        let business = self
            .business_repo
            .set_plan(business_id, plan)
            .await
            .map_err(|err| {
                error!(%business_id, db_error = ?err, "admin_businesses: failed to set plan");
                AdminBusinessError::Internal(err)
            })?
            .ok_or(AdminBusinessError::NotFound)?;

        info!(%business_id, %plan, "admin_businesses: plan changed");
        self.audit(AuditAction::BusinessPlanChanged, business_id, actor_id)
            .await;

        Ok(self.to_dto(business))
    }

    pub async fn set_status(
        &self,
        actor_id: Uuid,
        business_id: Uuid,
        status: BusinessStatus,
    ) -> UseCaseResult<BusinessDto> {
        let business = self
            .business_repo
            .set_status(business_id, status)
            .await
            .map_err(|err| {
                error!(%business_id, db_error = ?err, "admin_businesses: failed to set status");
                AdminBusinessError::Internal(err)
            })?
            .ok_or(AdminBusinessError::NotFound)?;

        info!(%business_id, %status, "admin_businesses: status changed");
        self.audit(AuditAction::BusinessStatusChanged, business_id, actor_id)
            .await;

        Ok(self.to_dto(business))
    }

    fn to_dto(&self, business: BusinessEntity) -> BusinessDto {
        let capabilities = self.gate.capabilities(business.plan).clone();
        let limits = self.gate.limits(business.plan);
        BusinessDto::new(business, capabilities, limits)
    }

    async fn audit(&self, action: AuditAction, business_id: Uuid, actor_id: Uuid) {
        let entry = AuditEntry {
            action,
            business_id,
            actor_id,
        };
        record_audit(self.audit_repo.as_ref(), entry, self.clock.now()).await;
    }
}
