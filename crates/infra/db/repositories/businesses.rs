use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain;
use crate::infra::db::postgres::{
    postgres_connection::{PgPoolSquad, is_unique_violation},
    schema::businesses,
};
use domain::{
    entities::businesses::{BusinessEntity, BusinessRow, UpdateBusinessEntity},
    repositories::businesses::{BusinessRepository, ProfileUpdateOutcome},
    value_objects::enums::{business_statuses::BusinessStatus, plan_tiers::PlanTier},
};

pub struct BusinessPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl BusinessPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BusinessRepository for BusinessPostgres {
    async fn find_by_id(&self, business_id: Uuid) -> Result<Option<BusinessEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = businesses::table
            .filter(businesses::id.eq(business_id))
            .select(BusinessRow::as_select())
            .first::<BusinessRow>(&mut conn)
            .optional()?;

        Ok(row.map(BusinessEntity::from))
    }

    async fn find_by_ids(&self, business_ids: Vec<Uuid>) -> Result<Vec<BusinessEntity>> {
        if business_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = businesses::table
            .filter(businesses::id.eq_any(business_ids))
            .select(BusinessRow::as_select())
            .load::<BusinessRow>(&mut conn)?;

        Ok(rows.into_iter().map(BusinessEntity::from).collect())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<BusinessEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = businesses::table
            .filter(businesses::owner_id.eq(owner_id))
            .select(BusinessRow::as_select())
            .first::<BusinessRow>(&mut conn)
            .optional()?;

        Ok(row.map(BusinessEntity::from))
    }

    async fn find_active_by_slug(&self, slug: String) -> Result<Option<BusinessEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = businesses::table
            .filter(businesses::slug.eq(slug))
            .filter(businesses::status.eq(BusinessStatus::Active.to_string()))
            .select(BusinessRow::as_select())
            .first::<BusinessRow>(&mut conn)
            .optional()?;

        Ok(row.map(BusinessEntity::from))
    }

    async fn update_profile(
        &self,
        business_id: Uuid,
        changes: UpdateBusinessEntity,
    ) -> Result<ProfileUpdateOutcome> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(businesses::table)
            .filter(businesses::id.eq(business_id))
            .set(&changes)
            .returning(BusinessRow::as_returning())
            .get_result::<BusinessRow>(&mut conn)
            .optional();

        match result {
            Ok(Some(row)) => Ok(ProfileUpdateOutcome::Updated(row.into())),
            Ok(None) => Ok(ProfileUpdateOutcome::NotFound),
            Err(err) if is_unique_violation(&err) => Ok(ProfileUpdateOutcome::DuplicateSlug),
            Err(err) => Err(err.into()),
        }
    }

    async fn set_plan(&self, business_id: Uuid, plan: PlanTier) -> Result<Option<BusinessEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = update(businesses::table)
            .filter(businesses::id.eq(business_id))
            .set((
                businesses::plan.eq(plan.to_string()),
                businesses::updated_at.eq(Utc::now()),
            ))
            .returning(BusinessRow::as_returning())
            .get_result::<BusinessRow>(&mut conn)
            .optional()?;

        Ok(row.map(BusinessEntity::from))
    }

    async fn set_status(
        &self,
        business_id: Uuid,
        status: BusinessStatus,
    ) -> Result<Option<BusinessEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = update(businesses::table)
            .filter(businesses::id.eq(business_id))
            .set((
                businesses::status.eq(status.to_string()),
                businesses::updated_at.eq(Utc::now()),
            ))
            .returning(BusinessRow::as_returning())
            .get_result::<BusinessRow>(&mut conn)
            .optional()?;

        Ok(row.map(BusinessEntity::from))
    }
}
