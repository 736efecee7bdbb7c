use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use crates::{
    domain::{
        clock::SystemClock,
        repositories::{
            audit_logs::AuditLogRepository, businesses::BusinessRepository,
            highlights::HighlightRepository,
        },
        value_objects::{
            highlights::{
                ApproveHighlightModel, CreateHighlightModel, EditHighlightModel,
                HighlightListFilter, RejectHighlightModel,
            },
            plans::CapabilityGate,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            audit_logs::AuditLogPostgres, businesses::BusinessPostgres,
            highlights::HighlightPostgres,
        },
    },
};
use tracing::info;
use uuid::Uuid;

use crate::{auth::AdminUser, usecases::highlights::HighlightUseCase};

pub fn routes(db_pool: Arc<PgPoolSquad>, gate: CapabilityGate) -> Router {
    let business_repository = BusinessPostgres::new(Arc::clone(&db_pool));
    let highlight_repository = HighlightPostgres::new(Arc::clone(&db_pool));
    let audit_log_repository = AuditLogPostgres::new(Arc::clone(&db_pool));

    let usecase = HighlightUseCase::new(
        Arc::new(business_repository),
        Arc::new(highlight_repository),
        Arc::new(audit_log_repository),
        gate,
        Arc::new(SystemClock),
    );

    Router::new()
        .route("/", get(list_highlights).post(create_highlight))
        .route(
            "/:highlight_id",
            patch(update_highlight).delete(delete_highlight),
        )
        .route("/:highlight_id/approve", post(approve_highlight))
        .route("/:highlight_id/reject", post(reject_highlight))
        .with_state(Arc::new(usecase))
}

pub async fn list_highlights<B, H, A>(
    State(usecase): State<Arc<HighlightUseCase<B, H, A>>>,
    _admin: AdminUser,
    Query(filter): Query<HighlightListFilter>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    H: HighlightRepository + Send + Sync + 'static,
    A: AuditLogRepository + Send + Sync + 'static,
{
    match usecase.list_highlights(filter).await {
        Ok(highlights) => Json(highlights).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_highlight<B, H, A>(
    State(usecase): State<Arc<HighlightUseCase<B, H, A>>>,
    AdminUser(admin): AdminUser,
    Json(create_highlight_model): Json<CreateHighlightModel>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    H: HighlightRepository + Send + Sync + 'static,
    A: AuditLogRepository + Send + Sync + 'static,
{
    match usecase
        .create_highlight(admin.user_id, create_highlight_model)
        .await
    {
        Ok(highlight) => (StatusCode::CREATED, Json(highlight)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_highlight<B, H, A>(
    State(usecase): State<Arc<HighlightUseCase<B, H, A>>>,
    _admin: AdminUser,
    Path(highlight_id): Path<Uuid>,
    Json(edit_highlight_model): Json<EditHighlightModel>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    H: HighlightRepository + Send + Sync + 'static,
    A: AuditLogRepository + Send + Sync + 'static,
{
    match usecase
        .update_highlight(highlight_id, edit_highlight_model)
        .await
    {
        Ok(highlight) => Json(highlight).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn approve_highlight<B, H, A>(
    State(usecase): State<Arc<HighlightUseCase<B, H, A>>>,
    AdminUser(admin): AdminUser,
    Path(highlight_id): Path<Uuid>,
    Json(approve_highlight_model): Json<ApproveHighlightModel>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    H: HighlightRepository + Send + Sync + 'static,
    A: AuditLogRepository + Send + Sync + 'static,
{
    info!(
        admin_id = %admin.user_id,
        %highlight_id,
        days = approve_highlight_model.days,
        "highlights: approve received"
    );

    match usecase
        .approve_highlight(admin.user_id, highlight_id, approve_highlight_model.days)
        .await
    {
        Ok(highlight) => Json(highlight).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn reject_highlight<B, H, A>(
    State(usecase): State<Arc<HighlightUseCase<B, H, A>>>,
    AdminUser(admin): AdminUser,
    Path(highlight_id): Path<Uuid>,
    reject_highlight_model: Option<Json<RejectHighlightModel>>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    H: HighlightRepository + Send + Sync + 'static,
    A: AuditLogRepository + Send + Sync + 'static,
{
    let notes = reject_highlight_model.and_then(|Json(model)| model.notes);
    info!(admin_id = %admin.user_id, %highlight_id, "highlights: reject received");

    match usecase
        .reject_highlight(admin.user_id, highlight_id, notes)
        .await
    {
        Ok(highlight) => Json(highlight).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_highlight<B, H, A>(
    State(usecase): State<Arc<HighlightUseCase<B, H, A>>>,
    AdminUser(admin): AdminUser,
    Path(highlight_id): Path<Uuid>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    H: HighlightRepository + Send + Sync + 'static,
    A: AuditLogRepository + Send + Sync + 'static,
{
    match usecase.delete_highlight(admin.user_id, highlight_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
