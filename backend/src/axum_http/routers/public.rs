use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use crates::{
    domain::{
        clock::SystemClock,
        repositories::{
            business_images::BusinessImageRepository, businesses::BusinessRepository,
            highlights::HighlightRepository,
        },
        value_objects::{enums::highlight_types::HighlightType, plans::CapabilityGate},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            business_images::BusinessImagePostgres, businesses::BusinessPostgres,
            highlights::HighlightPostgres,
        },
    },
};
use serde::Deserialize;

use crate::usecases::public_directory::PublicDirectoryUseCase;

#[derive(Debug, Deserialize)]
pub struct HomepageHighlightsQuery {
    #[serde(rename = "type", default)]
    highlight_type: HighlightType,
}

pub fn routes(db_pool: Arc<PgPoolSquad>, gate: CapabilityGate) -> Router {
    let business_repository = BusinessPostgres::new(Arc::clone(&db_pool));
    let highlight_repository = HighlightPostgres::new(Arc::clone(&db_pool));
    let image_repository = BusinessImagePostgres::new(Arc::clone(&db_pool));

    let usecase = PublicDirectoryUseCase::new(
        Arc::new(business_repository),
        Arc::new(highlight_repository),
        Arc::new(image_repository),
        gate,
        Arc::new(SystemClock),
    );

    Router::new()
        .route("/businesses/:slug", get(get_business))
        .route("/highlights", get(list_homepage_highlights))
        .route("/plans", get(list_plans))
        .with_state(Arc::new(usecase))
}

pub async fn get_business<B, H, I>(
    State(usecase): State<Arc<PublicDirectoryUseCase<B, H, I>>>,
    Path(slug): Path<String>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    H: HighlightRepository + Send + Sync + 'static,
    I: BusinessImageRepository + Send + Sync + 'static,
{
    match usecase.get_business(slug).await {
        Ok(business) => Json(business).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_homepage_highlights<B, H, I>(
    State(usecase): State<Arc<PublicDirectoryUseCase<B, H, I>>>,
    Query(query): Query<HomepageHighlightsQuery>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    H: HighlightRepository + Send + Sync + 'static,
    I: BusinessImageRepository + Send + Sync + 'static,
{
    match usecase.list_homepage_highlights(query.highlight_type).await {
        Ok(highlights) => Json(highlights).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_plans<B, H, I>(
    State(usecase): State<Arc<PublicDirectoryUseCase<B, H, I>>>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    H: HighlightRepository + Send + Sync + 'static,
    I: BusinessImageRepository + Send + Sync + 'static,
{
    Json(usecase.list_plans())
}
