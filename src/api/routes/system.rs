//! Liveness, readiness and metrics endpoints for the orchestrator.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::dtos::{ErrorResponse, PoolStatusResponse, ReadinessResponse};
use crate::api::routes::AppState;
use crate::error::{AppError, AppResult};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/ready", web::get().to(ready))
        .route("/metrics", web::get().to(metrics));
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Process is up", body = String)),
    tag = "system"
)]
pub(crate) async fn health() -> &'static str {
    "ok"
}

#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Database reachable", body = ReadinessResponse),
        (status = 503, description = "Database unreachable", body = ErrorResponse),
    ),
    tag = "system"
)]
pub(crate) async fn ready(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    if let Err(e) = sqlx::query("SELECT 1").execute(&state.db_pool).await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err(AppError::database_unavailable("Service not ready"));
    }

    Ok(HttpResponse::Ok().json(ReadinessResponse {
        status: "ready".to_string(),
        environment: state.app_environment.clone(),
        pool: pool_status(&state),
    }))
}

#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Prometheus text exposition", body = String, content_type = "text/plain"),
        (status = 403, description = "Caller is outside the private network", body = ErrorResponse),
    ),
    tag = "system"
)]
pub(crate) async fn metrics(
    state: web::Data<AppState>,
    request: HttpRequest,
) -> AppResult<HttpResponse> {
    let peer = request.peer_addr().map(|addr| addr.ip());
    if !state.security.allows_metrics_from(peer) {
        return Err(AppError::Forbidden(
            "metrics are only served to private networks".to_string(),
        ));
    }

    let pool = pool_status(&state);
    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(state.metrics.render_prometheus(pool.size, pool.idle)))
}

fn pool_status(state: &AppState) -> PoolStatusResponse {
    PoolStatusResponse {
        size: state.db_pool.size(),
        idle: state.db_pool.num_idle(),
    }
}
