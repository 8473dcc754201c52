mod atm_repository;
mod branch_repository;
mod traits;

pub use atm_repository::AtmRepositoryImpl;
pub use branch_repository::BranchRepositoryImpl;
pub use traits::{AtmRepository, BranchRepository};
