use thiserror::Error;

/// Rejected search input. Every variant is a client error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{field} must be a number between {min} and {max}")]
    CoordinateOutOfRange {
        field: &'static str,
        min: i16,
        max: i16,
    },

    #[error("{field} must be a finite number")]
    NotANumber { field: &'static str },

    #[error("radius must not be negative")]
    NegativeRadius,

    #[error("unknown accessibility option '{option}'; accepted options: {accepted}")]
    UnknownAccessibilityOption { option: String, accepted: String },

    #[error("at least one accessibility option is required")]
    NoAccessibilityOptions,

    #[error("invalid time '{0}'; expected HH:MM (24-hour clock)")]
    InvalidTimeOfDay(String),
}

impl DomainError {
    /// Request field the error refers to, in its wire spelling.
    pub fn field(&self) -> &'static str {
        match self {
            DomainError::CoordinateOutOfRange { field, .. } | DomainError::NotANumber { field } => {
                field
            }
            DomainError::NegativeRadius => "radius",
            DomainError::UnknownAccessibilityOption { .. }
            | DomainError::NoAccessibilityOptions => "options",
            DomainError::InvalidTimeOfDay(_) => "time",
        }
    }

    /// Short machine-readable code for the `details` entry.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::CoordinateOutOfRange { .. } | DomainError::NegativeRadius => "range",
            DomainError::NotANumber { .. } | DomainError::InvalidTimeOfDay(_) => "format",
            DomainError::UnknownAccessibilityOption { .. } => "allow_list",
            DomainError::NoAccessibilityOptions => "required",
        }
    }
}
