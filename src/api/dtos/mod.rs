pub mod atm_dto;
pub mod branch_dto;
pub mod common;

pub use atm_dto::*;
pub use branch_dto::*;
pub use common::*;
