use tracing::error;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Records a server error that escaped the handlers' own error logging.
///
/// Returns the event id written to the log so it can be correlated with the
/// request id.
pub fn capture_unexpected_5xx(
    path: &str,
    method: &str,
    status: u16,
    request_id: &str,
) -> AppResult<Uuid> {
    if !(500..=599).contains(&status) {
        return Err(AppError::BadRequest(format!(
            "status {status} is not a server error"
        )));
    }

    let event_id = Uuid::new_v4();
    error!(
        tracking_backend = "log",
        event_id = %event_id,
        request_id = %request_id,
        method = %method,
        path = %path,
        status = status,
        "unexpected server error"
    );
    Ok(event_id)
}
