use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*, result::Error as DieselError};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain;
use crate::infra::db::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{business_images, businesses},
};
use domain::{
    entities::business_images::{BusinessImageEntity, InsertBusinessImageEntity},
    repositories::business_images::BusinessImageRepository,
};

pub struct BusinessImagePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl BusinessImagePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BusinessImageRepository for BusinessImagePostgres {
    async fn list_by_business(&self, business_id: Uuid) -> Result<Vec<BusinessImageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = business_images::table
            .filter(business_images::business_id.eq(business_id))
            .order((
                business_images::sort_order.asc(),
                business_images::created_at.asc(),
            ))
            .select(BusinessImageEntity::as_select())
            .load::<BusinessImageEntity>(&mut conn)?;

        Ok(results)
    }

    async fn insert_within_limit(
        &self,
        insert_business_image_entity: InsertBusinessImageEntity,
        max_images: i64,
    ) -> Result<Option<BusinessImageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let business_id = insert_business_image_entity.business_id;

        let result = conn.transaction::<_, DieselError, _>(|conn| {
            businesses::table
                .filter(businesses::id.eq(business_id))
                .select(businesses::id)
                .for_update()
                .first::<Uuid>(conn)?;

            let count = business_images::table
                .filter(business_images::business_id.eq(business_id))
                .count()
                .get_result::<i64>(conn)?;

            if count >= max_images {
                return Ok(None);
            }

            insert_into(business_images::table)
                .values(&insert_business_image_entity)
                .returning(BusinessImageEntity::as_returning())
                .get_result::<BusinessImageEntity>(conn)
                .map(Some)
        })?;

        Ok(result)
    }

    async fn delete(&self, business_id: Uuid, image_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = diesel::delete(
            business_images::table
                .filter(business_images::id.eq(image_id))
                .filter(business_images::business_id.eq(business_id)),
        )
        .execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
