pub mod accessibility;
pub mod atm;
pub mod availability;
pub mod branch;
pub mod errors;

pub use accessibility::{AccessibilityFeature, BranchAccessibility};
pub use atm::{Atm, AtmLocation};
pub use availability::{BranchAvailability, DailyHours};
pub use branch::{Branch, BranchLocation};
pub use errors::DomainError;
