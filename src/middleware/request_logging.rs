//! Access log for every request, written once the response is ready.

use std::time::Instant;

use actix_web::dev::ServiceRequest;
use actix_web::http::header::{self, HeaderValue};
use tracing::info;
use uuid::Uuid;

use crate::observability::error_tracking::capture_unexpected_5xx;
use crate::observability::AppMetrics;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// What the access log needs from a request, captured before the request is
/// handed to the service and consumed.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub client_ip: String,
    pub user_agent: String,
    started: Instant,
}

impl RequestContext {
    pub fn capture(req: &ServiceRequest) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            method: req.method().to_string(),
            path: req.path().to_string(),
            client_ip: get_client_ip(req),
            user_agent: get_user_agent(req),
            started: Instant::now(),
        }
    }

    pub fn request_id_header(&self) -> HeaderValue {
        HeaderValue::from_str(&self.request_id)
            .unwrap_or_else(|_| HeaderValue::from_static("invalid-request-id"))
    }

    /// Records the outcome in `metrics`, writes the access log line and hands
    /// server errors to error tracking. Returns the latency in milliseconds.
    pub fn finish(&self, status: u16, metrics: &AppMetrics) -> u64 {
        let latency_ms = self.started.elapsed().as_millis() as u64;
        metrics.record_request(status, latency_ms);

        info!(
            request_id = %self.request_id,
            method = %self.method,
            path = %self.path,
            status = status,
            status_class = get_status_class(status),
            latency_ms = latency_ms,
            client_ip = %self.client_ip,
            user_agent = %self.user_agent,
            "request completed"
        );

        if status >= 500 {
            let _ = capture_unexpected_5xx(&self.path, &self.method, status, &self.request_id);
        }
        latency_ms
    }
}

/// Client address as reported by actix.
///
/// `realip_remote_addr` only trusts `Forwarded`/`X-Forwarded-For` when the
/// server is configured behind a proxy; the raw headers are never parsed here.
pub fn get_client_ip(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn get_user_agent(req: &ServiceRequest) -> String {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

pub fn get_status_class(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "unknown",
    }
}
