use crate::{
    axum_http::{default_routers, routers},
    config::config_model::DotEnvyConfig,
};
use anyhow::Result;
use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use crates::domain::value_objects::plans::{CapabilityGate, PlanCatalog};
use crates::infra::db::postgres::postgres_connection::PgPoolSquad;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

pub fn app(db_pool: Arc<PgPoolSquad>, plan_catalog: Arc<PlanCatalog>) -> Router {
    let gate = CapabilityGate::new(plan_catalog);

    Router::new()
        .fallback(default_routers::not_found)
        .nest(
            "/api/v1/me/business",
            routers::businesses::routes(Arc::clone(&db_pool), gate.clone()),
        )
        .nest(
            "/api/v1/me/highlights",
            routers::highlights::routes(Arc::clone(&db_pool), gate.clone()),
        )
        .nest(
            "/api/v1/admin/highlights",
            routers::admin_highlights::routes(Arc::clone(&db_pool), gate.clone()),
        )
        .nest(
            "/api/v1/admin/businesses",
            routers::admin_businesses::routes(Arc::clone(&db_pool), gate.clone()),
        )
        .nest(
            "/api/v1/public",
            routers::public::routes(Arc::clone(&db_pool), gate),
        )
        .route("/api/v1/health-check", get(default_routers::health_check))
}

pub async fn start(
    config: Arc<DotEnvyConfig>,
    db_pool: Arc<PgPoolSquad>,
    plan_catalog: Arc<PlanCatalog>,
) -> Result<()> {
    let app = app(db_pool, plan_catalog)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.backend_server.timeout,
        )))
        .layer(RequestBodyLimitLayer::new(
            (config.backend_server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.backend_server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.backend_server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
