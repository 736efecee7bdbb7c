use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use crates::{
    domain::{
        clock::SystemClock,
        repositories::{
            audit_logs::AuditLogRepository, businesses::BusinessRepository,
            highlights::HighlightRepository,
        },
        value_objects::{highlights::RequestHighlightModel, plans::CapabilityGate},
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

use crate::{auth::AuthUser, usecases::highlights::HighlightUseCase};

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
        .route("/", get(my_highlights))
        .route("/request", post(request_highlight))
        .with_state(Arc::new(usecase))
}

pub async fn my_highlights<B, H, A>(
    State(usecase): State<Arc<HighlightUseCase<B, H, A>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    H: HighlightRepository + Send + Sync + 'static,
    A: AuditLogRepository + Send + Sync + 'static,
{
    match usecase.my_highlights(user_id).await {
        Ok(highlights) => Json(highlights).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Body is optional; an empty request falls back to the business name and short description.
pub async fn request_highlight<B, H, A>(
    State(usecase): State<Arc<HighlightUseCase<B, H, A>>>,
    AuthUser { user_id, .. }: AuthUser,
    request_highlight_model: Option<Json<RequestHighlightModel>>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    H: HighlightRepository + Send + Sync + 'static,
    A: AuditLogRepository + Send + Sync + 'static,
{
    info!(%user_id, "highlights: request received from client");
    let request_highlight_model = request_highlight_model
        .map(|Json(model)| model)
        .unwrap_or_default();

    match usecase
        .request_highlight(user_id, request_highlight_model)
        .await
    {
        Ok(highlight) => (StatusCode::CREATED, Json(highlight)).into_response(),
        Err(err) => err.into_response(),
    }
}
