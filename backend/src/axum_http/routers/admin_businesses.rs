use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::put,
};
use crates::{
    domain::{
        clock::SystemClock,
        repositories::{audit_logs::AuditLogRepository, businesses::BusinessRepository},
        value_objects::{
            businesses::{SetBusinessPlanModel, SetBusinessStatusModel},
            plans::CapabilityGate,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{audit_logs::AuditLogPostgres, businesses::BusinessPostgres},
    },
};
use uuid::Uuid;

use crate::{auth::AdminUser, usecases::admin_businesses::AdminBusinessUseCase};

pub fn routes(db_pool: Arc<PgPoolSquad>, gate: CapabilityGate) -> Router {
    let business_repository = BusinessPostgres::new(Arc::clone(&db_pool));
    let audit_log_repository = AuditLogPostgres::new(Arc::clone(&db_pool));

    let usecase = AdminBusinessUseCase::new(
        Arc::new(business_repository),
        Arc::new(audit_log_repository),
        gate,
        Arc::new(SystemClock),
    );

    Router::new()
        .route("/:business_id/plan", put(set_plan))
        .route("/:business_id/status", put(set_status))
        .with_state(Arc::new(usecase))
}

pub async fn set_plan<B, A>(
    State(usecase): State<Arc<AdminBusinessUseCase<B, A>>>,
    AdminUser(admin): AdminUser,
    Path(business_id): Path<Uuid>,
    Json(set_business_plan_model): Json<SetBusinessPlanModel>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    A: AuditLogRepository + Send + Sync + 'static,
{
    match usecase
        .set_plan(admin.user_id, business_id, set_business_plan_model.plan)
        .await
    {
        Ok(business) => Json(business).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn set_status<B, A>(
    State(usecase): State<Arc<AdminBusinessUseCase<B, A>>>,
    AdminUser(admin): AdminUser,
    Path(business_id): Path<Uuid>,
    Json(set_business_status_model): Json<SetBusinessStatusModel>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    A: AuditLogRepository + Send + Sync + 'static,
{
    match usecase
        .set_status(admin.user_id, business_id, set_business_status_model.status)
        .await
    {
        Ok(business) => Json(business).into_response(),
        Err(err) => err.into_response(),
    }
}
