mod atm_service;
mod branch_service;

pub use atm_service::AtmService;
pub use branch_service::BranchService;

use crate::config::SearchConfig;
use crate::utils::geo::NearestQuery;

/// Builds a nearest-me query from the configured limit and pre-filter.
pub(crate) fn nearest_query(search: &SearchConfig, exclude_id: Option<i32>) -> NearestQuery<i32> {
    NearestQuery {
        limit: search.nearest_limit,
        max_radius_km: search.nearest_radius_cap(),
        exclude_id,
    }
}
