use async_trait::async_trait;
use chrono::NaiveTime;

use crate::domain::{
    AccessibilityFeature, Atm, AtmLocation, Branch, BranchAccessibility, BranchAvailability,
    BranchLocation,
};
use crate::error::AppResult;

/// Storage for branches and their satellite rows (location, accessibility,
/// opening hours).
///
/// The filtering methods have scan-and-filter defaults so in-memory stores only
/// implement the plain reads; the Postgres store pushes them into SQL.
#[async_trait]
pub trait BranchRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Branch>>;
    async fn find_by_id(&self, branch_id: i32) -> AppResult<Option<Branch>>;
    async fn create(&self, branch: &Branch) -> AppResult<Branch>;
    /// `None` when no row has `branch.branch_id`.
    async fn update(&self, branch: &Branch) -> AppResult<Option<Branch>>;
    /// `false` when nothing was deleted.
    async fn delete(&self, branch_id: i32) -> AppResult<bool>;

    async fn find_all_locations(&self) -> AppResult<Vec<BranchLocation>>;
    async fn find_locations_by_town(&self, town: &str) -> AppResult<Vec<BranchLocation>> {
        let locations = self.find_all_locations().await?;
        Ok(locations
            .into_iter()
            .filter(|location| location.in_town(town))
            .collect())
    }

    async fn find_all_accessibility(&self) -> AppResult<Vec<BranchAccessibility>>;
    async fn find_accessibility(&self, branch_id: i32) -> AppResult<Option<BranchAccessibility>>;
    async fn filter_accessibility(
        &self,
        features: &[AccessibilityFeature],
    ) -> AppResult<Vec<BranchAccessibility>> {
        let rows = self.find_all_accessibility().await?;
        Ok(rows.into_iter().filter(|row| row.has_all(features)).collect())
    }

    async fn find_all_availability(&self) -> AppResult<Vec<BranchAvailability>>;
    async fn find_availability(&self, branch_id: i32) -> AppResult<Option<BranchAvailability>>;
    async fn filter_availability(&self, time: NaiveTime) -> AppResult<Vec<BranchAvailability>> {
        let rows = self.find_all_availability().await?;
        Ok(rows.into_iter().filter(|row| row.is_open_at(time)).collect())
    }
}

#[async_trait]
pub trait AtmRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Atm>>;
    async fn find_by_id(&self, atm_id: i32) -> AppResult<Option<Atm>>;
    async fn create(&self, atm: &Atm) -> AppResult<Atm>;
    /// `None` when no row has `atm.atm_id`.
    async fn update(&self, atm: &Atm) -> AppResult<Option<Atm>>;
    /// `false` when nothing was deleted.
    async fn delete(&self, atm_id: i32) -> AppResult<bool>;
    async fn find_all_locations(&self) -> AppResult<Vec<AtmLocation>>;
}
