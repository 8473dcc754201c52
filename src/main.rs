use std::sync::Arc;

use actix_web::dev::Service as _;
use actix_web::http::header::HeaderName;
use actix_web::{middleware::Logger, web, App, HttpServer};
use bank_locator::api::openapi::configure_swagger_ui;
use bank_locator::api::routes::{self, AppState};
use bank_locator::application::{AtmService, BranchService};
use bank_locator::config::AppConfig;
use bank_locator::infrastructure::db::{migrations::run_migrations, pool::create_pool};
use bank_locator::infrastructure::repositories::{AtmRepositoryImpl, BranchRepositoryImpl};
use bank_locator::middleware::request_logging::{RequestContext, REQUEST_ID_HEADER};
use bank_locator::observability::AppMetrics;
use bank_locator::security::{cors_middleware, security_headers};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("failed to load application configuration");

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    let (json_layer, text_layer) = if config.logging.json_format {
        (
            Some(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            ),
            None,
        )
    } else {
        (None, Some(fmt::layer().compact()))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    config
        .validate()
        .expect("application configuration is invalid");

    let pool = create_pool(&config.database)
        .await
        .expect("failed to create database pool");

    run_migrations(&pool)
        .await
        .expect("database migrations failed");

    let branch_repo = Arc::new(BranchRepositoryImpl::new(pool.clone()));
    let atm_repo = Arc::new(AtmRepositoryImpl::new(pool.clone()));

    let state = AppState {
        branch_service: Arc::new(BranchService::new(branch_repo, config.search.clone())),
        atm_service: Arc::new(AtmService::new(atm_repo, config.search.clone())),
        security: config.security.clone(),
        app_environment: config.app.environment.clone(),
        metrics: Arc::new(AppMetrics::default()),
        db_pool: pool.clone(),
    };

    let bind_host = config.app.host.clone();
    let bind_port = config.app.port;
    let security_config = config.security.clone();
    let metrics = state.metrics.clone();

    info!(
        host = %bind_host,
        port = bind_port,
        environment = %state.app_environment,
        nearest_limit = config.search.nearest_limit,
        nearest_prefilter_km = ?config.search.nearest_radius_cap(),
        "starting bank locator"
    );

    HttpServer::new(move || {
        let metrics = metrics.clone();
        App::new()
            .wrap(Logger::default())
            .wrap_fn(move |req, srv| {
                let context = RequestContext::capture(&req);
                let metrics = metrics.clone();

                let fut = srv.call(req);
                async move {
                    let mut response = fut.await?;
                    response.headers_mut().insert(
                        HeaderName::from_static(REQUEST_ID_HEADER),
                        context.request_id_header(),
                    );
                    context.finish(response.status().as_u16(), &metrics);
                    Ok(response)
                }
            })
            .wrap(cors_middleware(&security_config))
            .wrap(security_headers())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
            .configure(configure_swagger_ui)
    })
    .bind((bind_host, bind_port))?
    .run()
    .await
}
