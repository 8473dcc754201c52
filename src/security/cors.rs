use actix_cors::Cors;
use actix_web::http::header;

use crate::config::SecurityConfig;
use crate::middleware::request_logging::REQUEST_ID_HEADER;

/// CORS policy admitting only the configured origins.
pub fn cors_middleware(config: &SecurityConfig) -> Cors {
    let allowlist = config.cors_allowed_origins.clone();

    Cors::default()
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static(REQUEST_ID_HEADER)])
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_origin_fn(move |origin, _| {
            origin
                .to_str()
                .ok()
                .map(|value| allowlist.iter().any(|allowed| allowed == value))
                .unwrap_or(false)
        })
        .max_age(3600)
}
