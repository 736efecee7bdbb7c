use std::{collections::HashMap, sync::Arc};

use crates::domain::{
    clock::Clock,
    repositories::{
        business_images::BusinessImageRepository, businesses::BusinessRepository,
        highlights::HighlightRepository,
    },
    value_objects::{
        enums::highlight_types::HighlightType,
        highlight_lifecycle::is_active_now,
        highlights::PublicHighlightDto,
        plans::{Capability, CapabilityGate, PlanDto},
        public_business::{PublicBusinessDto, project_public_business},
    },
};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum PublicDirectoryError {
    #[error("business not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PublicDirectoryError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PublicDirectoryError::NotFound => StatusCode::NOT_FOUND,
            PublicDirectoryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, PublicDirectoryError>;

/// Anonymous read side: plan-gated listings and the homepage carousel/cards.
pub struct PublicDirectoryUseCase<B, H, I>
where
    B: BusinessRepository + Send + Sync + 'static,
    H: HighlightRepository + Send + Sync + 'static,
    I: BusinessImageRepository + Send + Sync + 'static,
{
    business_repo: Arc<B>,
    highlight_repo: Arc<H>,
    image_repo: Arc<I>,
    gate: CapabilityGate,
    clock: Arc<dyn Clock>,
}

impl<B, H, I> PublicDirectoryUseCase<B, H, I>
where
    B: BusinessRepository + Send + Sync + 'static,
    H: HighlightRepository + Send + Sync + 'static,
    I: BusinessImageRepository + Send + Sync + 'static,
{
    pub fn new(
        business_repo: Arc<B>,
        highlight_repo: Arc<H>,
        image_repo: Arc<I>,
        gate: CapabilityGate,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            business_repo,
            highlight_repo,
            image_repo,
            gate,
            clock,
        }
    }

    pub async fn get_business(&self, slug: String) -> UseCaseResult<PublicBusinessDto> {
        let business = self
            .business_repo
            .find_active_by_slug(slug.clone())
            .await
            .map_err(|err| {
                error!(%slug, db_error = ?err, "public: failed to load business");
                PublicDirectoryError::Internal(err)
            })?
            .ok_or(PublicDirectoryError::NotFound)?;

        let gallery = if self.gate.has(business.plan, Capability::Gallery) {
            self.image_repo.list_by_business(business.id).await?
        } else {
            Vec::new()
        };

        Ok(project_public_business(&self.gate, business, gallery))
    }

    /// Highlights showing right now, in `sort_order`. Expired or switched-off ones never appear,
    /// whatever their stored status.
    pub async fn list_homepage_highlights(
        &self,
        highlight_type: HighlightType,
    ) -> UseCaseResult<Vec<PublicHighlightDto>> {
        let now = self.clock.now();
        let mut highlights: Vec<_> = self
            .highlight_repo
            .list_approved_by_type(highlight_type)
            .await
            .map_err(|err| {
                error!(%highlight_type, db_error = ?err, "public: failed to load highlights");
                PublicDirectoryError::Internal(err)
            })?
            .into_iter()
            .filter(|highlight| is_active_now(highlight, now))
            .collect();
        highlights.sort_by_key(|highlight| (highlight.sort_order, highlight.created_at));

        let mut business_ids: Vec<_> = highlights.iter().map(|h| h.business_id).collect();
        business_ids.sort();
        business_ids.dedup();

        let businesses: HashMap<_, _> = if business_ids.is_empty() {
            HashMap::new()
        } else {
            self.business_repo
                .find_by_ids(business_ids)
                .await?
                .into_iter()
                .map(|business| (business.id, business))
                .collect()
        };

        let public_highlights: Vec<_> = highlights
            .iter()
            .filter_map(|highlight| {
                businesses
                    .get(&highlight.business_id)
                    .map(|business| PublicHighlightDto::new(highlight, business))
            })
            .collect();

        debug!(
            %highlight_type,
            count = public_highlights.len(),
            "public: homepage highlights resolved"
        );
        Ok(public_highlights)
    }

    pub fn list_plans(&self) -> Vec<PlanDto> {
        PlanDto::list(&self.gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use crates::domain::{
        clock::MockClock,
        entities::{businesses::BusinessEntity, highlights::HighlightEntity},
        repositories::{
            business_images::MockBusinessImageRepository, businesses::MockBusinessRepository,
            highlights::MockHighlightRepository,
        },
        value_objects::{
            enums::{
                business_statuses::BusinessStatus, highlight_statuses::HighlightStatus,
                plan_tiers::PlanTier,
            },
            plans::PlanCatalog,
        },
    };
    use uuid::Uuid;

    type TestUseCase = PublicDirectoryUseCase<
        MockBusinessRepository,
        MockHighlightRepository,
        MockBusinessImageRepository,
    >;

    fn sample_business(plan: PlanTier) -> BusinessEntity {
        let now = Utc::now();
        BusinessEntity {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            category_id: None,
            name: "Café da Praça".to_string(),
            slug: "cafe-da-praca".to_string(),
            short_description: Some("Cafés especiais".to_string()),
            description: Some("Torra própria".to_string()),
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
            featured: true,
            status: BusinessStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    fn approved(
        business_id: Uuid,
        sort_order: i32,
        active: bool,
        ends_at: Option<DateTime<Utc>>,
    ) -> HighlightEntity {
        let now = Utc::now();
        HighlightEntity {
            id: Uuid::new_v4(),
            business_id,
            type_: HighlightType::Carousel.to_string(),
            status: HighlightStatus::Approved.to_string(),
            active,
            title: None,
            subtitle: None,
            sort_order,
            starts_at: None,
            ends_at,
            requested_at: None,
            reviewed_at: Some(now),
            admin_notes: None,
            created_at: now,
        }
    }

    fn usecase(
        business_repo: MockBusinessRepository,
        highlight_repo: MockHighlightRepository,
        image_repo: MockBusinessImageRepository,
        now: DateTime<Utc>,
    ) -> TestUseCase {
        let mut clock = MockClock::new();
        clock.expect_now().return_const(now);
        PublicDirectoryUseCase::new(
            Arc::new(business_repo),
            Arc::new(highlight_repo),
            Arc::new(image_repo),
            CapabilityGate::new(Arc::new(PlanCatalog::standard())),
            Arc::new(clock),
        )
    }

    #[tokio::test]
    async fn homepage_shows_only_running_highlights_in_order() {
        let now = Utc::now();
        let business = sample_business(PlanTier::Premium);
        let business_id = business.id;

        let second = approved(business_id, 2, true, Some(now + Duration::days(3)));
        let first = approved(business_id, 1, true, None);
        let expired = approved(business_id, 0, true, Some(now - Duration::seconds(1)));
        let paused = approved(business_id, 0, false, None);
        let (first_id, second_id) = (first.id, second.id);

        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo
            .expect_list_approved_by_type()
            .with(mockall::predicate::eq(HighlightType::Carousel))
            .returning(move |_| {
                let rows = vec![second.clone(), expired.clone(), first.clone(), paused.clone()];
                Box::pin(async move { Ok(rows) })
            });

        let mut business_repo = MockBusinessRepository::new();
        business_repo
            .expect_find_by_ids()
            .withf(move |ids| ids == &vec![business_id])
            .returning(move |_| {
                let business = business.clone();
                Box::pin(async move { Ok(vec![business]) })
            });

        let result = usecase(
            business_repo,
            highlight_repo,
            MockBusinessImageRepository::new(),
            now,
        )
        .list_homepage_highlights(HighlightType::Carousel)
        .await
        .unwrap();

        let ids: Vec<_> = result.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![first_id, second_id]);
        assert_eq!(result[0].title, "Café da Praça");
        assert_eq!(result[0].subtitle.as_deref(), Some("Cafés especiais"));
        assert_eq!(result[0].business_slug, "cafe-da-praca");
    }

    #[tokio::test]
    async fn empty_homepage_skips_business_lookup() {
        let mut highlight_repo = MockHighlightRepository::new();
        highlight_repo
            .expect_list_approved_by_type()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        let mut business_repo = MockBusinessRepository::new();
        business_repo.expect_find_by_ids().never();

        let result = usecase(
            business_repo,
            highlight_repo,
            MockBusinessImageRepository::new(),
            Utc::now(),
        )
        .list_homepage_highlights(HighlightType::Card)
        .await
        .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn free_listing_skips_gallery_lookup() {
        let business = sample_business(PlanTier::Free);
        let mut business_repo = MockBusinessRepository::new();
        business_repo
            .expect_find_active_by_slug()
            .returning(move |_| {
                let business = business.clone();
                Box::pin(async move { Ok(Some(business)) })
            });
        let mut image_repo = MockBusinessImageRepository::new();
        image_repo.expect_list_by_business().never();

        let view = usecase(
            business_repo,
            MockHighlightRepository::new(),
            image_repo,
            Utc::now(),
        )
        .get_business("cafe-da-praca".to_string())
        .await
        .unwrap();

        assert_eq!(view.description, None);
        assert_eq!(view.gallery, None);
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let mut business_repo = MockBusinessRepository::new();
        business_repo
            .expect_find_active_by_slug()
            .returning(|_| Box::pin(async { Ok(None) }));

        let result = usecase(
            business_repo,
            MockHighlightRepository::new(),
            MockBusinessImageRepository::new(),
            Utc::now(),
        )
        .get_business("nope".to_string())
        .await;

        assert!(matches!(result, Err(PublicDirectoryError::NotFound)));
    }
}
