use std::sync::Arc;

use actix_web::web;
use sqlx::PgPool;

use crate::application::{AtmService, BranchService};
use crate::config::SecurityConfig;
use crate::error::{AppError, AppResult};
use crate::observability::AppMetrics;

pub mod atms;
pub mod branches;
pub mod system;

#[derive(Clone)]
pub struct AppState {
    pub branch_service: Arc<BranchService>,
    pub atm_service: Arc<AtmService>,
    pub security: SecurityConfig,
    pub app_environment: String,
    pub metrics: Arc<AppMetrics>,
    pub db_pool: PgPool,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .configure(branches::configure)
        .configure(atms::configure)
        .configure(system::configure);
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| {
            AppError::BadRequest(format!("invalid request body: {err}")).into()
        })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("invalid query string: {err}")).into()
    })
}

/// Parses a record identifier taken from the path.
pub(crate) fn parse_id(raw: &str, field: &str) -> AppResult<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or_else(|| AppError::BadRequest(format!("{field} must be a positive integer")))
}
