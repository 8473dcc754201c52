use crate::domain::DomainError;
use crate::error::app_error::{AppError, ValidationIssue};
use crate::error::db_mapping::{map_database_error, CONNECT_FAILED, POOL_EXHAUSTED};
use crate::error::validation_mapping::collect_validation_issues;

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        let issue = ValidationIssue {
            field: err.field().to_string(),
            message: message.clone(),
            code: err.code().to_string(),
        };

        AppError::ValidationError {
            message,
            issues: vec![issue],
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_) => AppError::database_unavailable(CONNECT_FAILED),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::database_unavailable(POOL_EXHAUSTED)
            }
            sqlx::Error::Database(database_error) => {
                let mapped = map_database_error(
                    database_error.code().as_deref(),
                    database_error.constraint(),
                    database_error.message(),
                );
                mapped.unwrap_or(AppError::DatabaseError(sqlx::Error::Database(database_error)))
            }
            other => AppError::DatabaseError(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut issues = Vec::new();
        collect_validation_issues(None, &err, &mut issues);
        issues.sort_by(|left, right| {
            left.field
                .cmp(&right.field)
                .then(left.code.cmp(&right.code))
        });

        let message = match issues.as_slice() {
            [issue] => issue.message.clone(),
            _ => "Request validation failed".to_string(),
        };

        AppError::ValidationError { message, issues }
    }
}
