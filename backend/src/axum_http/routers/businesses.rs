use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use crates::{
    domain::{
        clock::{Clock, SystemClock},
        repositories::{business_images::BusinessImageRepository, businesses::BusinessRepository},
        value_objects::{
            businesses::UpdateBusinessProfileModel, gallery::RegisterGalleryImageModel,
            plans::CapabilityGate,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{business_images::BusinessImagePostgres, businesses::BusinessPostgres},
    },
};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    usecases::{business_profile::BusinessProfileUseCase, gallery::GalleryUseCase},
};

pub fn routes(db_pool: Arc<PgPoolSquad>, gate: CapabilityGate) -> Router {
    let business_repository = Arc::new(BusinessPostgres::new(Arc::clone(&db_pool)));
    let image_repository = BusinessImagePostgres::new(Arc::clone(&db_pool));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let profile_usecase = BusinessProfileUseCase::new(
        Arc::clone(&business_repository),
        gate.clone(),
        Arc::clone(&clock),
    );
    let gallery_usecase = GalleryUseCase::new(
        business_repository,
        Arc::new(image_repository),
        gate,
        clock,
    );

    let profile = Router::new()
        .route("/", get(get_my_business).patch(update_profile))
        .with_state(Arc::new(profile_usecase));

    let gallery = Router::new()
        .route("/gallery", get(list_gallery).post(register_gallery_image))
        .route("/gallery/:image_id", delete(remove_gallery_image))
        .with_state(Arc::new(gallery_usecase));

    profile.merge(gallery)
}

pub async fn get_my_business<B>(
    State(usecase): State<Arc<BusinessProfileUseCase<B>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
{
    match usecase.get_my_business(user_id).await {
        Ok(business) => Json(business).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_profile<B>(
    State(usecase): State<Arc<BusinessProfileUseCase<B>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(update_business_profile_model): Json<UpdateBusinessProfileModel>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
{
    info!(%user_id, "business_profile: update request received");

    match usecase
        .update_profile(user_id, update_business_profile_model)
        .await
    {
        Ok(response) => Json(response).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_gallery<B, I>(
    State(usecase): State<Arc<GalleryUseCase<B, I>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    I: BusinessImageRepository + Send + Sync + 'static,
{
    match usecase.list(user_id).await {
        Ok(images) => Json(images).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn register_gallery_image<B, I>(
    State(usecase): State<Arc<GalleryUseCase<B, I>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(register_gallery_image_model): Json<RegisterGalleryImageModel>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    I: BusinessImageRepository + Send + Sync + 'static,
{
    match usecase.register(user_id, register_gallery_image_model).await {
        Ok(image) => (StatusCode::CREATED, Json(image)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn remove_gallery_image<B, I>(
    State(usecase): State<Arc<GalleryUseCase<B, I>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(image_id): Path<Uuid>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    I: BusinessImageRepository + Send + Sync + 'static,
{
    match usecase.remove(user_id, image_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
