use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{
    PgConnection, QueryResult, RunQueryDsl, insert_into, prelude::*,
    result::Error as DieselError, update,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain;
use crate::infra::db::postgres::{
    postgres_connection::{PgPoolSquad, is_unique_violation},
    schema::{businesses, highlights},
};
use domain::{
    entities::highlights::{
        EditHighlightEntity, HighlightEntity, InsertHighlightEntity, ReviewHighlightEntity,
    },
    repositories::highlights::{HighlightRepository, HighlightWrite},
    value_objects::{
        enums::{highlight_statuses::HighlightStatus, highlight_types::HighlightType},
        highlight_lifecycle::{featured_from, has_outstanding_request},
    },
};

pub struct HighlightPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl HighlightPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

/// Serializes every highlight write of one business behind its row lock.
fn lock_business(conn: &mut PgConnection, business_id: Uuid) -> QueryResult<Uuid> {
    businesses::table
        .filter(businesses::id.eq(business_id))
        .select(businesses::id)
        .for_update()
        .first::<Uuid>(conn)
}

fn recompute_featured(conn: &mut PgConnection, business_id: Uuid) -> QueryResult<bool> {
    let current = highlights::table
        .filter(highlights::business_id.eq(business_id))
        .select(HighlightEntity::as_select())
        .load::<HighlightEntity>(conn)?;
    let featured = featured_from(&current);

    update(businesses::table)
        .filter(businesses::id.eq(business_id))
        .set((
            businesses::featured.eq(featured),
            businesses::updated_at.eq(Utc::now()),
        ))
        .execute(conn)?;

    Ok(featured)
}

#[async_trait]
impl HighlightRepository for HighlightPostgres {
    async fn find_by_id(&self, highlight_id: Uuid) -> Result<Option<HighlightEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let highlight = highlights::table
            .filter(highlights::id.eq(highlight_id))
            .select(HighlightEntity::as_select())
            .first::<HighlightEntity>(&mut conn)
            .optional()?;

        Ok(highlight)
    }

    async fn find_by_business(&self, business_id: Uuid) -> Result<Vec<HighlightEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = highlights::table
            .filter(highlights::business_id.eq(business_id))
            .order(highlights::created_at.desc())
            .select(HighlightEntity::as_select())
            .load::<HighlightEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list(&self, status: Option<HighlightStatus>) -> Result<Vec<HighlightEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = highlights::table
            .select(HighlightEntity::as_select())
            .order(highlights::created_at.desc())
            .into_boxed();

        if let Some(status) = status {
            query = query.filter(highlights::status.eq(status.to_string()));
        }

        Ok(query.load::<HighlightEntity>(&mut conn)?)
    }

    async fn list_approved_by_type(
        &self,
        highlight_type: HighlightType,
    ) -> Result<Vec<HighlightEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Time window is left to the caller's clock.
        let results = highlights::table
            .filter(highlights::type_.eq(highlight_type.to_string()))
            .filter(highlights::status.eq(HighlightStatus::Approved.to_string()))
            .filter(highlights::active.eq(true))
            .order((highlights::sort_order.asc(), highlights::created_at.desc()))
            .select(HighlightEntity::as_select())
            .load::<HighlightEntity>(&mut conn)?;

        Ok(results)
    }

    async fn insert_request(
        &self,
        insert_highlight_entity: InsertHighlightEntity,
        now: DateTime<Utc>,
    ) -> Result<Option<HighlightEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let business_id = insert_highlight_entity.business_id;

        let result = conn.transaction::<_, DieselError, _>(|conn| {
            lock_business(conn, business_id)?;

            let existing = highlights::table
                .filter(highlights::business_id.eq(business_id))
                .select(HighlightEntity::as_select())
                .load::<HighlightEntity>(conn)?;

            if has_outstanding_request(&existing, now) {
                return Ok(None);
            }

            insert_into(highlights::table)
                .values(&insert_highlight_entity)
                .returning(HighlightEntity::as_returning())
                .get_result::<HighlightEntity>(conn)
                .map(Some)
        });

        match result {
            Ok(highlight) => Ok(highlight),
            // highlights_one_pending_per_business
            Err(err) if is_unique_violation(&err) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn insert(
        &self,
        insert_highlight_entity: InsertHighlightEntity,
    ) -> Result<HighlightWrite> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let business_id = insert_highlight_entity.business_id;

        let result = conn.transaction::<_, DieselError, _>(|conn| {
            lock_business(conn, business_id)?;

            let highlight = insert_into(highlights::table)
                .values(&insert_highlight_entity)
                .returning(HighlightEntity::as_returning())
                .get_result::<HighlightEntity>(conn)?;
            let featured = recompute_featured(conn, business_id)?;

            Ok(HighlightWrite {
                highlight,
                featured,
            })
        })?;

        Ok(result)
    }

    async fn apply_review(
        &self,
        highlight_id: Uuid,
        review: ReviewHighlightEntity,
    ) -> Result<Option<HighlightWrite>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = conn.transaction::<_, DieselError, _>(|conn| {
            let Some(business_id) = highlights::table
                .filter(highlights::id.eq(highlight_id))
                .select(highlights::business_id)
                .first::<Uuid>(conn)
                .optional()?
            else {
                return Ok(None);
            };
            lock_business(conn, business_id)?;

            let Some(highlight) = update(highlights::table)
                .filter(highlights::id.eq(highlight_id))
                .filter(highlights::status.eq(HighlightStatus::Pending.to_string()))
                .set(&review)
                .returning(HighlightEntity::as_returning())
                .get_result::<HighlightEntity>(conn)
                .optional()?
            else {
                return Ok(None);
            };
            let featured = recompute_featured(conn, business_id)?;

            Ok(Some(HighlightWrite {
                highlight,
                featured,
            }))
        })?;

        Ok(result)
    }

    async fn update_details(
        &self,
        highlight_id: Uuid,
        changes: EditHighlightEntity,
    ) -> Result<Option<HighlightEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(highlights::table)
            .filter(highlights::id.eq(highlight_id))
            .set(&changes)
            .returning(HighlightEntity::as_returning())
            .get_result::<HighlightEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn delete(&self, highlight_id: Uuid) -> Result<Option<bool>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = conn.transaction::<_, DieselError, _>(|conn| {
            let Some(business_id) = highlights::table
                .filter(highlights::id.eq(highlight_id))
                .select(highlights::business_id)
                .first::<Uuid>(conn)
                .optional()?
            else {
                return Ok(None);
            };
            lock_business(conn, business_id)?;

            let deleted =
                diesel::delete(highlights::table.filter(highlights::id.eq(highlight_id)))
                    .execute(conn)?;
            if deleted == 0 {
                return Ok(None);
            }

            recompute_featured(conn, business_id).map(Some)
        })?;

        Ok(result)
    }
}
