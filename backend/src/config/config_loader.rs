use std::fs;

use anyhow::{Context, Result};
use crates::domain::value_objects::plans::PlanCatalog;
use tracing::info;

use crate::config::{
    config_model::{AuthSecret, BackendServer, Database, DotEnvyConfig, Plans},
    stage::Stage,
};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: required("SERVER_PORT_BACKEND")?
            .parse()
            .context("SERVER_PORT_BACKEND is invalid")?,
        body_limit: required("SERVER_BODY_LIMIT")?
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: required("SERVER_TIMEOUT")?
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
    };

    let plans = Plans {
        catalog_path: std::env::var("PLAN_CATALOG_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty()),
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        plans,
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(&stage_str).unwrap_or_default()
}

pub fn get_auth_secret() -> Result<AuthSecret> {
    dotenvy::dotenv().ok();

    Ok(AuthSecret {
        jwt_secret: required("JWT_SECRET")?,
    })
}

/// Builds the plan catalog once at startup.
pub fn load_plan_catalog(plans: &Plans) -> Result<PlanCatalog> {
    match plans.catalog_path.as_deref() {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read plan catalog at {path}"))?;
            let catalog = PlanCatalog::from_json_str(&raw)
                .with_context(|| format!("failed to parse plan catalog at {path}"))?;
            info!(path, "plan catalog loaded from file");
            Ok(catalog)
        }
        None => {
            info!("using built-in plan catalog");
            Ok(PlanCatalog::standard())
        }
    }
}

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{key} is invalid"))
}
