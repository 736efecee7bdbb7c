use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::highlights::{
        EditHighlightEntity, HighlightEntity, InsertHighlightEntity, ReviewHighlightEntity,
    },
    value_objects::enums::{highlight_statuses::HighlightStatus, highlight_types::HighlightType},
};

/// A committed highlight write and the `business.featured` value recomputed in the same
/// transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightWrite {
    pub highlight: HighlightEntity,
    pub featured: bool,
}

#[async_trait]
#[automock]
pub trait HighlightRepository {
    async fn find_by_id(&self, highlight_id: Uuid) -> Result<Option<HighlightEntity>>;

    async fn find_by_business(&self, business_id: Uuid) -> Result<Vec<HighlightEntity>>;

    async fn list(&self, status: Option<HighlightStatus>) -> Result<Vec<HighlightEntity>>;

    async fn list_approved_by_type(
        &self,
        highlight_type: HighlightType,
    ) -> Result<Vec<HighlightEntity>>;

    /// Inserts a client request unless the business already has an outstanding one.
    ///
    /// The check is repeated under a lock on the business row, so `None` means the request
    /// lost a race (or was a duplicate) and nothing was written.
    async fn insert_request(
        &self,
        insert_highlight_entity: InsertHighlightEntity,
        now: DateTime<Utc>,
    ) -> Result<Option<HighlightEntity>>;

    // The three writes below lock the business row, mutate the highlight and recompute
    // `business.featured` in one transaction. Either all of it commits or none of it does.

    async fn insert(
        &self,
        insert_highlight_entity: InsertHighlightEntity,
    ) -> Result<HighlightWrite>;

    /// Applies a review only while the row is still pending; `None` otherwise.
    async fn apply_review(
        &self,
        highlight_id: Uuid,
        review: ReviewHighlightEntity,
    ) -> Result<Option<HighlightWrite>>;

    async fn update_details(
        &self,
        highlight_id: Uuid,
        changes: EditHighlightEntity,
    ) -> Result<Option<HighlightEntity>>;

    /// `Some(featured)` once the row is gone, `None` when there was nothing to delete.
    async fn delete(&self, highlight_id: Uuid) -> Result<Option<bool>>;
}
