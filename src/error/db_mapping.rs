use super::app_error::AppError;

pub(super) const CONNECT_FAILED: &str = "Unable to connect to database. Please try again later.";
pub(super) const POOL_EXHAUSTED: &str = "Service temporarily unavailable. Please try again later.";

/// Maps PostgreSQL SQLSTATE codes onto client-facing errors. `None` leaves the
/// error as an opaque database failure.
pub(super) fn map_database_error(
    code: Option<&str>,
    constraint: Option<&str>,
    message: &str,
) -> Option<AppError> {
    match code {
        Some("23505") => Some(AppError::Conflict(
            conflict_message_from_constraint(constraint).to_string(),
        )),
        Some("23502") => Some(AppError::validation_error(
            required_field_message_from_db(message)
                .unwrap_or_else(|| "required field is missing".to_string()),
        )),
        Some("23503") => Some(AppError::BadRequest(
            foreign_key_message_from_constraint(constraint).to_string(),
        )),
        Some("23514") => Some(AppError::validation_error(
            "request violates validation rules",
        )),
        Some("22P02") | Some("22003") => Some(AppError::validation_error("invalid input format")),
        Some("08001") | Some("08006") => Some(AppError::database_unavailable(CONNECT_FAILED)),
        Some("53300") => Some(AppError::database_unavailable(POOL_EXHAUSTED)),
        Some("55P03") => Some(AppError::Conflict(
            "Resource is currently locked. Please try again.".to_string(),
        )),
        _ => None,
    }
}

pub(super) fn conflict_message_from_constraint(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("branches_pkey") => "branch already exists",
        Some("atms_pkey") => "atm already exists",
        Some("branch_locations_pkey") => "branch location already exists",
        Some("branch_accessibility_pkey") => "branch accessibility already exists",
        Some("branch_availability_pkey") => "branch availability already exists",
        Some("atm_locations_pkey") => "atm location already exists",
        _ => "resource already exists",
    }
}

pub(super) fn foreign_key_message_from_constraint(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("atms_branch_id_fkey")
        | Some("branch_locations_branch_id_fkey")
        | Some("branch_accessibility_branch_id_fkey")
        | Some("branch_availability_branch_id_fkey") => "referenced branch does not exist",
        Some("atm_locations_atm_id_fkey") => "referenced atm does not exist",
        _ => "referenced resource does not exist",
    }
}

pub(super) fn required_field_message_from_db(message: &str) -> Option<String> {
    let marker = "column \"";
    let start = message.find(marker)?;
    let rest = &message[start + marker.len()..];
    let end = rest.find('"')?;
    let field = &rest[..end];
    Some(format!("{field} is required"))
}
