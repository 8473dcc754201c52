use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Standard error response structure for API errors
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type (e.g., "BadRequest", "NotFound", "Conflict")
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Machine-readable error code (e.g., "VALIDATION_ERROR")
    pub code: String,
    /// Field-level issues, present on validation failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationIssueResponse>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationIssueResponse {
    pub field: String,
    pub message: String,
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub environment: String,
    pub pool: PoolStatusResponse,
}

/// Connection counts of the shared database pool.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolStatusResponse {
    pub size: u32,
    pub idle: usize,
}

/// `?exclude=` on the nearest-me searches.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearestQueryParams {
    /// Identifier to leave out of the results, usually the caller's own record
    pub exclude: Option<i32>,
}

/// Formats a time of day the way every response renders it.
pub fn format_time(time: Option<chrono::NaiveTime>) -> Option<String> {
    time.map(|value| value.format("%H:%M").to_string())
}
