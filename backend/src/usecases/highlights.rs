use std::sync::Arc;

use crates::domain::{
    clock::Clock,
    entities::{
        businesses::BusinessEntity,
        highlights::{HighlightEntity, InsertHighlightEntity, ReviewHighlightEntity},
    },
    repositories::{
        audit_logs::AuditLogRepository,
        businesses::BusinessRepository,
        highlights::{HighlightRepository, HighlightWrite},
    },
    value_objects::{
        audit_logs::{AuditAction, AuditEntry},
        enums::{
            business_statuses::BusinessStatus, highlight_statuses::HighlightStatus,
            highlight_types::HighlightType,
        },
        highlight_lifecycle::{self, TransitionError, has_outstanding_request},
        highlights::{
            CreateHighlightModel, EditHighlightModel, HighlightDto, HighlightListFilter,
            MyHighlightsDto, RequestHighlightModel,
        },
        plans::{Capability, CapabilityGate},
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::audit::record_audit;

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("business not found")]
    BusinessNotFound,
    #[error("highlight not found")]
    HighlightNotFound,
    #[error("business must be active to request a highlight")]
    BusinessNotActive,
    #[error("current plan does not include {0}")]
    CapabilityDenied(Capability),
    #[error("a highlight request is already pending or active")]
    AlreadyRequested,
    #[error("highlight already processed")]
    InvalidTransition,
    #[error("approval window must be a positive number of days within the calendar range, got {0}")]
    InvalidDays(i64),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl HighlightError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            HighlightError::BusinessNotFound | HighlightError::HighlightNotFound => {
                StatusCode::NOT_FOUND
            }
            HighlightError::BusinessNotActive | HighlightError::CapabilityDenied(_) => {
                StatusCode::FORBIDDEN
            }
            HighlightError::AlreadyRequested
            | HighlightError::InvalidTransition
            | HighlightError::InvalidDays(_) => StatusCode::BAD_REQUEST,
            HighlightError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TransitionError> for HighlightError {
    fn from(value: TransitionError) -> Self {
        match value {
            TransitionError::AlreadyProcessed(_) => HighlightError::InvalidTransition,
            TransitionError::InvalidDuration(days) => HighlightError::InvalidDays(days),
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, HighlightError>;

/// Request/review/delete flow for highlights. Every admin write hands back the
/// `business.featured` value the repository recomputed in the same transaction.
pub struct HighlightUseCase<B, H, A>
where
    B: BusinessRepository + Send + Sync + 'static,
    H: HighlightRepository + Send + Sync + 'static,
    A: AuditLogRepository + Send + Sync + 'static,
{
    business_repo: Arc<B>,
    highlight_repo: Arc<H>,
    audit_repo: Arc<A>,
    gate: CapabilityGate,
    clock: Arc<dyn Clock>,
}

impl<B, H, A> HighlightUseCase<B, H, A>
where
    B: BusinessRepository + Send + Sync + 'static,
    H: HighlightRepository + Send + Sync + 'static,
    A: AuditLogRepository + Send + Sync + 'static,
{
    pub fn new(
        business_repo: Arc<B>,
        highlight_repo: Arc<H>,
        audit_repo: Arc<A>,
        gate: CapabilityGate,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            business_repo,
            highlight_repo,
            audit_repo,
            gate,
            clock,
        }
    }

    pub fn can_request(&self, business: &BusinessEntity) -> bool {
        business.status == BusinessStatus::Active
            && self.gate.has(business.plan, Capability::HighlightRequest)
    }

    pub async fn my_highlights(&self, owner_id: Uuid) -> UseCaseResult<MyHighlightsDto> {
        let business = self.business_of_owner(owner_id).await?;
        let highlights = self.load_highlights(business.id).await?;
        let now = self.clock.now();

        Ok(MyHighlightsDto {
            can_request: self.can_request(&business),
            has_outstanding_request: has_outstanding_request(&highlights, now),
            highlights: highlights
                .into_iter()
                .map(|highlight| HighlightDto::new(highlight, now))
                .collect(),
        })
    }

    pub async fn request_highlight(
        &self,
        owner_id: Uuid,
        request_highlight_model: RequestHighlightModel,
    ) -> UseCaseResult<HighlightDto> {
        info!(%owner_id, "highlights: request received");

        let business = self.business_of_owner(owner_id).await?;
        let business_id = business.id;

        if business.status != BusinessStatus::Active {
            warn!(%business_id, status = %business.status, "highlights: business not active");
            return Err(HighlightError::BusinessNotActive);
        }
        if !self.gate.has(business.plan, Capability::HighlightRequest) {
            warn!(%business_id, plan = %business.plan, "highlights: plan lacks highlight_request");
            return Err(HighlightError::CapabilityDenied(
                Capability::HighlightRequest,
            ));
        }

        let now = self.clock.now();
        let existing = self.load_highlights(business_id).await?;
        if has_outstanding_request(&existing, now) {
            warn!(%business_id, "highlights: outstanding request already exists");
            return Err(HighlightError::AlreadyRequested);
        }

        let insert_highlight_entity = InsertHighlightEntity {
            business_id,
            type_: HighlightType::Carousel.to_string(),
            status: HighlightStatus::Pending.to_string(),
            active: false,
            title: non_blank(request_highlight_model.title).or(Some(business.name.clone())),
            subtitle: non_blank(request_highlight_model.subtitle)
                .or(business.short_description.clone()),
            sort_order: 0,
            starts_at: None,
            ends_at: None,
            requested_at: Some(now),
            reviewed_at: None,
            admin_notes: None,
            created_at: now,
        };

        let highlight = self
            .highlight_repo
            .insert_request(insert_highlight_entity, now)
            .await
            .map_err(|err| {
                error!(%business_id, db_error = ?err, "highlights: failed to insert request");
                HighlightError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%business_id, "highlights: request lost race with another request");
                HighlightError::AlreadyRequested
            })?;

        info!(%business_id, highlight_id = %highlight.id, "highlights: request created");
        self.audit(AuditAction::HighlightRequested, business_id, owner_id)
            .await;

        Ok(HighlightDto::new(highlight, now))
    }

    pub async fn list_highlights(
        &self,
        filter: HighlightListFilter,
    ) -> UseCaseResult<Vec<HighlightDto>> {
        let highlights = self.highlight_repo.list(filter.status).await.map_err(|err| {
            error!(db_error = ?err, "highlights: failed to list highlights");
            HighlightError::Internal(err)
        })?;
        let now = self.clock.now();

        info!(count = highlights.len(), "highlights: admin list loaded");
        Ok(highlights
            .into_iter()
            .map(|highlight| HighlightDto::new(highlight, now))
            .collect())
    }

    pub async fn create_highlight(
        &self,
        actor_id: Uuid,
        create_highlight_model: CreateHighlightModel,
    ) -> UseCaseResult<HighlightDto> {
        let business_id = create_highlight_model.business_id;
        let business = self
            .business_repo
            .find_by_id(business_id)
            .await?
            .ok_or(HighlightError::BusinessNotFound)?;

        let now = self.clock.now();
        let insert_highlight_entity = InsertHighlightEntity {
            business_id: business.id,
            type_: create_highlight_model.highlight_type.to_string(),
            status: HighlightStatus::Approved.to_string(),
            active: create_highlight_model.active,
            title: non_blank(create_highlight_model.title),
            subtitle: non_blank(create_highlight_model.subtitle),
            sort_order: create_highlight_model.sort_order,
            starts_at: create_highlight_model.starts_at,
            ends_at: create_highlight_model.ends_at,
            requested_at: None,
            reviewed_at: Some(now),
            admin_notes: None,
            created_at: now,
        };

        let HighlightWrite {
            highlight,
            featured,
        } = self
            .highlight_repo
            .insert(insert_highlight_entity)
            .await
            .map_err(|err| {
                error!(%business_id, db_error = ?err, "highlights: failed to create highlight");
                HighlightError::Internal(err)
            })?;

        info!(
            %business_id,
            highlight_id = %highlight.id,
            featured,
            "highlights: admin highlight created"
        );
        self.audit(AuditAction::HighlightCreated, business_id, actor_id)
            .await;

        Ok(HighlightDto::new(highlight, now))
    }

    /// Data edit only; the status never moves here.
    pub async fn update_highlight(
        &self,
        highlight_id: Uuid,
        edit_highlight_model: EditHighlightModel,
    ) -> UseCaseResult<HighlightDto> {
        let highlight = if edit_highlight_model.is_empty() {
            self.find_highlight(highlight_id).await?
        } else {
            self.highlight_repo
                .update_details(highlight_id, edit_highlight_model.into_changeset())
                .await?
                .ok_or(HighlightError::HighlightNotFound)?
        };

        info!(%highlight_id, "highlights: highlight updated");
        Ok(HighlightDto::new(highlight, self.clock.now()))
    }

    pub async fn approve_highlight(
        &self,
        actor_id: Uuid,
        highlight_id: Uuid,
        days: i64,
    ) -> UseCaseResult<HighlightDto> {
        let highlight = self.find_highlight(highlight_id).await?;
        let now = self.clock.now();

        let review = highlight_lifecycle::approve(&highlight, days, now).map_err(|err| {
            warn!(%highlight_id, error = %err, "highlights: approve rejected");
            HighlightError::from(err)
        })?;

        let HighlightWrite {
            highlight: approved,
            featured,
        } = self.apply_review(highlight_id, review).await?;

        info!(
            %highlight_id,
            business_id = %approved.business_id,
            days,
            featured,
            "highlights: highlight approved"
        );
        self.audit(AuditAction::HighlightApproved, approved.business_id, actor_id)
            .await;

        Ok(HighlightDto::new(approved, now))
    }

    pub async fn reject_highlight(
        &self,
        actor_id: Uuid,
        highlight_id: Uuid,
        notes: Option<String>,
    ) -> UseCaseResult<HighlightDto> {
        let highlight = self.find_highlight(highlight_id).await?;
        let now = self.clock.now();

        let review =
            highlight_lifecycle::reject(&highlight, non_blank(notes), now).map_err(|err| {
                warn!(%highlight_id, error = %err, "highlights: reject rejected");
                HighlightError::from(err)
            })?;

        let HighlightWrite {
            highlight: rejected,
            featured,
        } = self.apply_review(highlight_id, review).await?;

        info!(
            %highlight_id,
            business_id = %rejected.business_id,
            featured,
            "highlights: highlight rejected"
        );
        self.audit(AuditAction::HighlightRejected, rejected.business_id, actor_id)
            .await;

        Ok(HighlightDto::new(rejected, now))
    }

    pub async fn delete_highlight(&self, actor_id: Uuid, highlight_id: Uuid) -> UseCaseResult<()> {
        let highlight = self.find_highlight(highlight_id).await?;
        let business_id = highlight.business_id;

        let featured = self
            .highlight_repo
            .delete(highlight_id)
            .await
            .map_err(|err| {
                error!(%highlight_id, db_error = ?err, "highlights: failed to delete highlight");
                HighlightError::Internal(err)
            })?
            .ok_or(HighlightError::HighlightNotFound)?;

        info!(%highlight_id, %business_id, featured, "highlights: highlight deleted");
        self.audit(AuditAction::HighlightDeleted, business_id, actor_id)
            .await;

        Ok(())
    }

    async fn apply_review(
        &self,
        highlight_id: Uuid,
        review: ReviewHighlightEntity,
    ) -> UseCaseResult<HighlightWrite> {
        self.highlight_repo
            .apply_review(highlight_id, review)
            .await
            .map_err(|err| {
                error!(%highlight_id, db_error = ?err, "highlights: failed to apply review");
                HighlightError::Internal(err)
            })?
            .ok_or_else(|| {
                // Another reviewer got there between our read and the conditional update.
                warn!(%highlight_id, "highlights: highlight no longer pending");
                HighlightError::InvalidTransition
            })
    }

    async fn business_of_owner(&self, owner_id: Uuid) -> UseCaseResult<BusinessEntity> {
        self.business_repo
            .find_by_owner(owner_id)
            .await
            .map_err(|err| {
                error!(%owner_id, db_error = ?err, "highlights: failed to load business");
                HighlightError::Internal(err)
            })?
            .ok_or(HighlightError::BusinessNotFound)
    }

    async fn find_highlight(&self, highlight_id: Uuid) -> UseCaseResult<HighlightEntity> {
        self.highlight_repo
            .find_by_id(highlight_id)
            .await
            .map_err(|err| {
                error!(%highlight_id, db_error = ?err, "highlights: failed to load highlight");
                HighlightError::Internal(err)
            })?
            .ok_or(HighlightError::HighlightNotFound)
    }

    async fn load_highlights(&self, business_id: Uuid) -> UseCaseResult<Vec<HighlightEntity>> {
        self.highlight_repo
            .find_by_business(business_id)
            .await
            .map_err(|err| {
                error!(%business_id, db_error = ?err, "highlights: failed to load highlights");
                HighlightError::Internal(err)
            })
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

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use crates::domain::{
        clock::MockClock,
        repositories::{
            audit_logs::MockAuditLogRepository, businesses::MockBusinessRepository,
            highlights::MockHighlightRepository,
        },
        value_objects::{
            enums::plan_tiers::PlanTier, highlight_lifecycle::HighlightPhase, plans::PlanCatalog,
        },
    };
    use mockall::predicate::eq;

    type TestUseCase =
        HighlightUseCase<MockBusinessRepository, MockHighlightRepository, MockAuditLogRepository>;

    fn sample_business(plan: PlanTier, status: BusinessStatus) -> BusinessEntity {
        let now = Utc::now();
        BusinessEntity {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            category_id: None,
            name: "Sorveteria Polar".to_string(),
            slug: "sorveteria-polar".to_string(),
            short_description: Some("Gelato artesanal".to_string()),
            description: None,
            tags: vec![],
            phone: None,
            whatsapp: None,
            email: None,
            website: None,
            instagram: None,
            facebook: None,
            social_links: vec![],
            street: None,
            number: None,
            complement: None,
            neighborhood: None,
            city: None,
            state: None,
            zip_code: None,
            plan,
            featured: false,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_highlight(
        business_id: Uuid,
        status: HighlightStatus,
        active: bool,
        ends_at: Option<DateTime<Utc>>,
    ) -> HighlightEntity {
        let now = Utc::now();
        HighlightEntity {
            id: Uuid::new_v4(),
            business_id,
            type_: HighlightType::Carousel.to_string(),
            status: status.to_string(),
            active,
            title: None,
            subtitle: None,
            sort_order: 0,
            starts_at: None,
            ends_at,
            requested_at: Some(now),
            reviewed_at: None,
            admin_notes: None,
            created_at: now,
        }
    }

    fn entity_from_insert(insert: InsertHighlightEntity) -> HighlightEntity {
        HighlightEntity {
            id: Uuid::new_v4(),
            business_id: insert.business_id,
            type_: insert.type_,
            status: insert.status,
            active: insert.active,
            title: insert.title,
            subtitle: insert.subtitle,
            sort_order: insert.sort_order,
            starts_at: insert.starts_at,
            ends_at: insert.ends_at,
            requested_at: insert.requested_at,
            reviewed_at: insert.reviewed_at,
            admin_notes: insert.admin_notes,
            created_at: insert.created_at,
        }
    }

    fn fixed_clock(now: DateTime<Utc>) -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_now().return_const(now);
        Arc::new(clock)
    }

    fn quiet_audit() -> MockAuditLogRepository {
        let mut audit_repo = MockAuditLogRepository::new();
        audit_repo
            .expect_record()
            .returning(|_| Box::pin(async { Ok(()) }));
        audit_repo
    }

    fn usecase(
        business_repo: MockBusinessRepository,
        highlight_repo: MockHighlightRepository,
        audit_repo: MockAuditLogRepository,
        now: DateTime<Utc>,
    ) -> TestUseCase {
        HighlightUseCase::new(
            Arc::new(business_repo),
            Arc::new(highlight_repo),
            Arc::new(audit_repo),
            CapabilityGate::new(Arc::new(PlanCatalog::standard())),
            fixed_clock(now),
        )
    }

    fn owned_by(business: &BusinessEntity) -> MockBusinessRepository {
        let mut business_repo = MockBusinessRepository::new();
        let found = business.clone();
        business_repo
            .expect_find_by_owner()
            .with(eq(business.owner_id))
            .returning(move |_| {
                let business = found.clone();
                Box::pin(async move { Ok(Some(business)) })
            });
        business_repo
    }

    #[tokio::test]
    async fn premium_business_requests_pending_highlight() {
        let now = Utc::now();
        let business = sample_business(PlanTier::Premium, BusinessStatus::Active);
        let business_repo = owned_by(&business);
        let mut highlight_repo = MockHighlightRepository::new();

        highlight_repo
            .expect_find_by_business()
            .with(eq(business.id))
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        highlight_repo
            .expect_insert_request()
            .withf(move |insert, at| {
                insert.status == "pending"
                    && !insert.active
                    && insert.type_ == "carousel"
                    && insert.sort_order == 0
                    && insert.requested_at == Some(now)
                    && *at == now
            })
            .times(1)
            .returning(|insert, _| {
                let highlight = entity_from_insert(insert);
                Box::pin(async move { Ok(Some(highlight)) })
            });

        let usecase = usecase(business_repo, highlight_repo, quiet_audit(), now);
        let dto = usecase
            .request_highlight(business.owner_id, RequestHighlightModel::default())
            .await
            .unwrap();

        assert_eq!(dto.status, HighlightStatus::Pending);
        assert!(!dto.active);
        assert_eq!(dto.phase, HighlightPhase::Pending);
        assert_eq!(dto.title.as_deref(), Some("Sorveteria Polar"));
        assert_eq!(dto.subtitle.as_deref(), Some("Gelato artesanal"));
    }

    #[tokio::test]
    async fn second_request_before_review_is_refused() {
        let now = Utc::now();
        let business = sample_business(PlanTier::Premium, BusinessStatus::Active);
        let business_repo = owned_by(&business);
        let mut highlight_repo = MockHighlightRepository::new();

        let pending = sample_highlight(business.id, HighlightStatus::Pending, false, None);
        highlight_repo.expect_find_by_business().returning(move |_| {
            let pending = pending.clone();
            Box::pin(async move { Ok(vec![pending]) })
        });
        highlight_repo.expect_insert_request().never();

        let usecase = usecase(
            business_repo,
            highlight_repo,
            MockAuditLogRepository::new(),
            now,
        );
        let result = usecase
            .request_highlight(business.owner_id, RequestHighlightModel::default())
            .await;

        assert!(matches!(result, Err(HighlightError::AlreadyRequested)));
    }

    #[tokio::test]
    async fn active_approved_highlight_blocks_request_but_expired_does_not() {
        let now = Utc::now();
        let business = sample_business(PlanTier::Premium, BusinessStatus::Active);
        let mut highlight_repo = MockHighlightRepository::new();

        let running = sample_highlight(
            business.id,
            HighlightStatus::Approved,
            true,
            Some(now + Duration::days(2)),
        );
        highlight_repo.expect_find_by_business().returning(move |_| {
            let running = running.clone();
            Box::pin(async move { Ok(vec![running]) })
        });

        let blocked = usecase(
            owned_by(&business),
            highlight_repo,
            MockAuditLogRepository::new(),
            now,
        );
        let result = blocked
            .request_highlight(business.owner_id, RequestHighlightModel::default())
            .await;
        assert!(matches!(result, Err(HighlightError::AlreadyRequested)));

        let mut highlight_repo = MockHighlightRepository::new();
        let expired = sample_highlight(
            business.id,
            HighlightStatus::Approved,
            true,
            Some(now - Duration::seconds(1)),
        );
        highlight_repo.expect_find_by_business().returning(move |_| {
            let expired = expired.clone();
            Box::pin(async move { Ok(vec![expired]) })
        });
        highlight_repo
            .expect_insert_request()
            .times(1)
            .returning(|insert, _| {
                let highlight = entity_from_insert(insert);
                Box::pin(async move { Ok(Some(highlight)) })
            });

        let allowed = usecase(owned_by(&business), highlight_repo, quiet_audit(), now);
        let result = allowed
            .request_highlight(business.owner_id, RequestHighlightModel::default())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn lost_insert_race_reports_already_requested() {
        let now = Utc::now();
        let business = sample_business(PlanTier::Premium, BusinessStatus::Active);
        let mut highlight_repo = MockHighlightRepository::new();

        highlight_repo
            .expect_find_by_business()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        highlight_repo
            .expect_insert_request()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase = usecase(
            owned_by(&business),
            highlight_repo,
            MockAuditLogRepository::new(),
            now,
        );
        let result = usecase
            .request_highlight(business.owner_id, RequestHighlightModel::default())
            .await;

        assert!(matches!(result, Err(HighlightError::AlreadyRequested)));
    }

    #[tokio::test]
    async fn free_business_is_denied_highlight_request() {
        let business = sample_business(PlanTier::Free, BusinessStatus::Active);
        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo.expect_insert_request().never();

        let usecase = usecase(
            owned_by(&business),
            highlight_repo,
            MockAuditLogRepository::new(),
            Utc::now(),
        );
        let result = usecase
            .request_highlight(business.owner_id, RequestHighlightModel::default())
            .await;

        assert!(matches!(
            result,
            Err(HighlightError::CapabilityDenied(Capability::HighlightRequest))
        ));
        assert_eq!(
            result.unwrap_err().status_code(),
            axum::http::StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn pending_business_cannot_request() {
        let business = sample_business(PlanTier::Premium, BusinessStatus::Pending);

        let usecase = usecase(
            owned_by(&business),
            MockHighlightRepository::new(),
            MockAuditLogRepository::new(),
            Utc::now(),
        );
        assert!(!usecase.can_request(&business));

        let result = usecase
            .request_highlight(business.owner_id, RequestHighlightModel::default())
            .await;
        assert!(matches!(result, Err(HighlightError::BusinessNotActive)));
    }

    #[tokio::test]
    async fn unknown_owner_gets_not_found() {
        let mut business_repo = MockBusinessRepository::new();
        business_repo
            .expect_find_by_owner()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = usecase(
            business_repo,
            MockHighlightRepository::new(),
            MockAuditLogRepository::new(),
            Utc::now(),
        );
        let result = usecase
            .request_highlight(Uuid::new_v4(), RequestHighlightModel::default())
            .await;

        assert!(matches!(result, Err(HighlightError::BusinessNotFound)));
    }

    #[tokio::test]
    async fn approve_opens_seven_day_window_and_features_business() {
        let now = Utc::now();
        let business_id = Uuid::new_v4();
        let pending = sample_highlight(business_id, HighlightStatus::Pending, false, None);
        let highlight_id = pending.id;

        let mut approved = pending.clone();
        approved.status = HighlightStatus::Approved.to_string();
        approved.active = true;
        approved.starts_at = Some(now);
        approved.ends_at = Some(now + Duration::days(7));
        approved.reviewed_at = Some(now);

        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo
            .expect_find_by_id()
            .with(eq(highlight_id))
            .returning(move |_| {
                let pending = pending.clone();
                Box::pin(async move { Ok(Some(pending)) })
            });
        let applied = approved.clone();
        highlight_repo
            .expect_apply_review()
            .withf(move |id, review| {
                *id == highlight_id
                    && review.status == "approved"
                    && review.active == Some(true)
                    && review.ends_at == Some(Some(now + Duration::days(7)))
            })
            .times(1)
            .returning(move |_, _| {
                let write = HighlightWrite {
                    highlight: applied.clone(),
                    featured: true,
                };
                Box::pin(async move { Ok(Some(write)) })
            });
        highlight_repo.expect_find_by_business().never();

        let usecase = usecase(
            MockBusinessRepository::new(),
            highlight_repo,
            quiet_audit(),
            now,
        );
        let dto = usecase
            .approve_highlight(Uuid::new_v4(), highlight_id, 7)
            .await
            .unwrap();

        assert_eq!(dto.status, HighlightStatus::Approved);
        assert!(dto.active);
        assert_eq!(dto.ends_at, Some(now + Duration::days(7)));
        assert_eq!(dto.phase, HighlightPhase::Active);
    }

    #[tokio::test]
    async fn approving_twice_fails_without_touching_the_record() {
        let now = Utc::now();
        let already = sample_highlight(
            Uuid::new_v4(),
            HighlightStatus::Approved,
            true,
            Some(now + Duration::days(6)),
        );
        let highlight_id = already.id;

        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo.expect_find_by_id().returning(move |_| {
            let already = already.clone();
            Box::pin(async move { Ok(Some(already)) })
        });
        highlight_repo.expect_apply_review().never();

        let usecase = usecase(
            MockBusinessRepository::new(),
            highlight_repo,
            MockAuditLogRepository::new(),
            now,
        );
        let result = usecase
            .approve_highlight(Uuid::new_v4(), highlight_id, 7)
            .await;

        assert!(matches!(result, Err(HighlightError::InvalidTransition)));
    }

    #[tokio::test]
    async fn concurrent_review_surfaces_as_invalid_transition() {
        let pending = sample_highlight(Uuid::new_v4(), HighlightStatus::Pending, false, None);
        let highlight_id = pending.id;

        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo.expect_find_by_id().returning(move |_| {
            let pending = pending.clone();
            Box::pin(async move { Ok(Some(pending)) })
        });
        highlight_repo
            .expect_apply_review()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase = usecase(
            MockBusinessRepository::new(),
            highlight_repo,
            MockAuditLogRepository::new(),
            Utc::now(),
        );
        let result = usecase
            .reject_highlight(Uuid::new_v4(), highlight_id, None)
            .await;

        assert!(matches!(result, Err(HighlightError::InvalidTransition)));
    }

    #[tokio::test]
    async fn approve_with_non_positive_days_is_bad_request() {
        let pending = sample_highlight(Uuid::new_v4(), HighlightStatus::Pending, false, None);
        let highlight_id = pending.id;

        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo.expect_find_by_id().returning(move |_| {
            let pending = pending.clone();
            Box::pin(async move { Ok(Some(pending)) })
        });
        highlight_repo.expect_apply_review().never();

        let usecase = usecase(
            MockBusinessRepository::new(),
            highlight_repo,
            MockAuditLogRepository::new(),
            Utc::now(),
        );
        let result = usecase
            .approve_highlight(Uuid::new_v4(), highlight_id, 0)
            .await;

        assert!(matches!(result, Err(HighlightError::InvalidDays(0))));
    }

    #[tokio::test]
    async fn approve_with_out_of_range_days_is_bad_request() {
        let pending = sample_highlight(Uuid::new_v4(), HighlightStatus::Pending, false, None);
        let highlight_id = pending.id;

        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo.expect_find_by_id().returning(move |_| {
            let pending = pending.clone();
            Box::pin(async move { Ok(Some(pending)) })
        });
        highlight_repo.expect_apply_review().never();

        let usecase = usecase(
            MockBusinessRepository::new(),
            highlight_repo,
            MockAuditLogRepository::new(),
            Utc::now(),
        );
        let result = usecase
            .approve_highlight(Uuid::new_v4(), highlight_id, i64::MAX)
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, HighlightError::InvalidDays(i64::MAX)));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn reject_keeps_business_unfeatured() {
        let now = Utc::now();
        let business_id = Uuid::new_v4();
        let pending = sample_highlight(business_id, HighlightStatus::Pending, false, None);
        let highlight_id = pending.id;

        let mut rejected = pending.clone();
        rejected.status = HighlightStatus::Rejected.to_string();
        rejected.reviewed_at = Some(now);
        rejected.admin_notes = Some("low resolution".to_string());

        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo.expect_find_by_id().returning(move |_| {
            let pending = pending.clone();
            Box::pin(async move { Ok(Some(pending)) })
        });
        let applied = rejected.clone();
        highlight_repo
            .expect_apply_review()
            .withf(|_, review| {
                review.status == "rejected"
                    && review.admin_notes == Some(Some("low resolution".to_string()))
            })
            .returning(move |_, _| {
                let write = HighlightWrite {
                    highlight: applied.clone(),
                    featured: false,
                };
                Box::pin(async move { Ok(Some(write)) })
            });

        let mut audit_repo = MockAuditLogRepository::new();
        audit_repo
            .expect_record()
            .withf(move |entry| {
                entry.action == "highlight.rejected" && entry.business_id == business_id
            })
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let usecase = usecase(MockBusinessRepository::new(), highlight_repo, audit_repo, now);
        let dto = usecase
            .reject_highlight(
                Uuid::new_v4(),
                highlight_id,
                Some("  low resolution ".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(dto.status, HighlightStatus::Rejected);
        assert_eq!(dto.phase, HighlightPhase::Rejected);
    }

    #[tokio::test]
    async fn deleting_only_approved_highlight_clears_featured() {
        let only = sample_highlight(Uuid::new_v4(), HighlightStatus::Approved, true, None);
        let highlight_id = only.id;

        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo.expect_find_by_id().returning(move |_| {
            let only = only.clone();
            Box::pin(async move { Ok(Some(only)) })
        });
        highlight_repo
            .expect_delete()
            .with(eq(highlight_id))
            .times(1)
            .returning(|_| Box::pin(async { Ok(Some(false)) }));

        let usecase = usecase(
            MockBusinessRepository::new(),
            highlight_repo,
            quiet_audit(),
            Utc::now(),
        );
        usecase
            .delete_highlight(Uuid::new_v4(), highlight_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn highlight_gone_before_delete_is_not_found() {
        let only = sample_highlight(Uuid::new_v4(), HighlightStatus::Approved, true, None);
        let highlight_id = only.id;

        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo.expect_find_by_id().returning(move |_| {
            let only = only.clone();
            Box::pin(async move { Ok(Some(only)) })
        });
        highlight_repo
            .expect_delete()
            .returning(|_| Box::pin(async { Ok(None) }));
        let mut audit_repo = MockAuditLogRepository::new();
        audit_repo.expect_record().never();

        let usecase = usecase(
            MockBusinessRepository::new(),
            highlight_repo,
            audit_repo,
            Utc::now(),
        );
        let result = usecase.delete_highlight(Uuid::new_v4(), highlight_id).await;

        assert!(matches!(result, Err(HighlightError::HighlightNotFound)));
    }

    #[tokio::test]
    async fn failed_delete_is_internal_and_not_audited() {
        let only = sample_highlight(Uuid::new_v4(), HighlightStatus::Approved, true, None);
        let highlight_id = only.id;

        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo.expect_find_by_id().returning(move |_| {
            let only = only.clone();
            Box::pin(async move { Ok(Some(only)) })
        });
        highlight_repo
            .expect_delete()
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("connection reset")) }));
        let mut audit_repo = MockAuditLogRepository::new();
        audit_repo.expect_record().never();

        let usecase = usecase(
            MockBusinessRepository::new(),
            highlight_repo,
            audit_repo,
            Utc::now(),
        );
        let result = usecase.delete_highlight(Uuid::new_v4(), highlight_id).await;

        assert!(matches!(result, Err(HighlightError::Internal(_))));
    }

    #[tokio::test]
    async fn failed_review_write_leaves_no_separate_featured_write() {
        let pending = sample_highlight(Uuid::new_v4(), HighlightStatus::Pending, false, None);
        let highlight_id = pending.id;

        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo.expect_find_by_id().returning(move |_| {
            let pending = pending.clone();
            Box::pin(async move { Ok(Some(pending)) })
        });
        // Review and featured recompute roll back together inside the repository.
        highlight_repo
            .expect_apply_review()
            .times(1)
            .returning(|_, _| {
                Box::pin(async { Err(anyhow::anyhow!("could not serialize access")) })
            });
        highlight_repo.expect_find_by_business().never();
        let mut audit_repo = MockAuditLogRepository::new();
        audit_repo.expect_record().never();

        // No expectations: any business write from the use case would panic.
        let usecase = usecase(
            MockBusinessRepository::new(),
            highlight_repo,
            audit_repo,
            Utc::now(),
        );
        let result = usecase
            .approve_highlight(Uuid::new_v4(), highlight_id, 7)
            .await;

        assert!(matches!(result, Err(HighlightError::Internal(_))));
    }

    #[tokio::test]
    async fn audit_failure_does_not_fail_request() {
        let now = Utc::now();
        let business = sample_business(PlanTier::Premium, BusinessStatus::Active);
        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo
            .expect_find_by_business()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        highlight_repo.expect_insert_request().returning(|insert, _| {
            let highlight = entity_from_insert(insert);
            Box::pin(async move { Ok(Some(highlight)) })
        });

        let mut audit_repo = MockAuditLogRepository::new();
        audit_repo
            .expect_record()
            .times(1)
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("audit table locked")) }));

        let usecase = usecase(owned_by(&business), highlight_repo, audit_repo, now);
        let result = usecase
            .request_highlight(business.owner_id, RequestHighlightModel::default())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn admin_created_highlight_is_approved_and_features_business() {
        let now = Utc::now();
        let business = sample_business(PlanTier::Basic, BusinessStatus::Active);
        let business_id = business.id;

        let mut business_repo = MockBusinessRepository::new();
        business_repo
            .expect_find_by_id()
            .with(eq(business_id))
            .returning(move |_| {
                let business = business.clone();
                Box::pin(async move { Ok(Some(business)) })
            });

        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo
            .expect_insert()
            .withf(|insert| insert.status == "approved" && insert.type_ == "card")
            .times(1)
            .returning(|insert| {
                let write = HighlightWrite {
                    highlight: entity_from_insert(insert),
                    featured: true,
                };
                Box::pin(async move { Ok(write) })
            });

        let usecase = usecase(business_repo, highlight_repo, quiet_audit(), now);
        let model = CreateHighlightModel {
            business_id,
            highlight_type: HighlightType::Card,
            title: Some("Promo de verão".to_string()),
            subtitle: None,
            sort_order: 2,
            active: true,
            starts_at: None,
            ends_at: None,
        };
        let dto = usecase.create_highlight(Uuid::new_v4(), model).await.unwrap();

        assert_eq!(dto.status, HighlightStatus::Approved);
        assert_eq!(dto.highlight_type, HighlightType::Card);
        assert_eq!(dto.phase, HighlightPhase::Active);
        assert_eq!(dto.requested_at, None);
    }

    #[tokio::test]
    async fn empty_edit_returns_current_record() {
        let current = sample_highlight(Uuid::new_v4(), HighlightStatus::Approved, false, None);
        let highlight_id = current.id;

        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo.expect_find_by_id().returning(move |_| {
            let current = current.clone();
            Box::pin(async move { Ok(Some(current)) })
        });
        highlight_repo.expect_update_details().never();

        let usecase = usecase(
            MockBusinessRepository::new(),
            highlight_repo,
            MockAuditLogRepository::new(),
            Utc::now(),
        );
        let dto = usecase
            .update_highlight(highlight_id, EditHighlightModel::default())
            .await
            .unwrap();

        assert_eq!(dto.phase, HighlightPhase::Paused);
    }

    #[tokio::test]
    async fn my_highlights_reports_eligibility() {
        let now = Utc::now();
        let business = sample_business(PlanTier::Premium, BusinessStatus::Active);
        let pending = sample_highlight(business.id, HighlightStatus::Pending, false, None);

        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo.expect_find_by_business().returning(move |_| {
            let pending = pending.clone();
            Box::pin(async move { Ok(vec![pending]) })
        });

        let usecase = usecase(
            owned_by(&business),
            highlight_repo,
            MockAuditLogRepository::new(),
            now,
        );
        let dto = usecase.my_highlights(business.owner_id).await.unwrap();

        assert!(dto.can_request);
        assert!(dto.has_outstanding_request);
        assert_eq!(dto.highlights.len(), 1);
    }
}
