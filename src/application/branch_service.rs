use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::api::dtos::{
    AccessibilityResponse, AvailabilityResponse, BranchCreatedResponse, BranchLocationResponse,
    BranchResponse, CreateBranchRequest, UpdateBranchRequest,
};
use crate::application::nearest_query;
use crate::config::SearchConfig;
use crate::domain::availability::parse_time_of_day;
use crate::domain::{AccessibilityFeature, Branch};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::BranchRepository;
use crate::utils::geo::{self, GeoPoint};

const ACCESSIBILITY_USAGE: &str =
    "options query parameter is required, e.g. /branches/accessibility?options=InternalRamp,HearingLoop";
const AVAILABILITY_USAGE: &str =
    "time query parameter is required, e.g. /branches/availability/filter?time=08:30";

#[derive(Clone)]
pub struct BranchService {
    branch_repo: Arc<dyn BranchRepository>,
    search: SearchConfig,
}

impl BranchService {
    pub fn new(branch_repo: Arc<dyn BranchRepository>, search: SearchConfig) -> Self {
        Self {
            branch_repo,
            search,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<BranchResponse>> {
        let branches = self.branch_repo.find_all().await?;
        Ok(branches.into_iter().map(BranchResponse::from).collect())
    }

    pub async fn get_by_id(&self, branch_id: i32) -> AppResult<BranchResponse> {
        let branch = self.find_existing(branch_id).await?;
        Ok(branch.into())
    }

    pub async fn create(&self, request: CreateBranchRequest) -> AppResult<BranchCreatedResponse> {
        let request = request.trimmed();
        request.validate()?;

        let branch = Branch {
            branch_id: request.branch_id,
            name: request.name,
            phone_number: request.phone_number,
        };
        let created = self.branch_repo.create(&branch).await?;

        info!(branch_id = created.branch_id, "branch created");
        Ok(BranchCreatedResponse {
            branch_id: created.branch_id,
        })
    }

    pub async fn update(
        &self,
        branch_id: i32,
        request: UpdateBranchRequest,
    ) -> AppResult<BranchResponse> {
        let request = request.trimmed();
        request.validate()?;
        self.find_existing(branch_id).await?;

        let branch = Branch {
            branch_id,
            name: request.name,
            phone_number: request.phone_number,
        };
        let updated = self
            .branch_repo
            .update(&branch)
            .await?
            .ok_or_else(|| not_found(branch_id))?;

        info!(branch_id, "branch updated");
        Ok(updated.into())
    }

    pub async fn delete(&self, branch_id: i32) -> AppResult<()> {
        self.find_existing(branch_id).await?;

        if !self.branch_repo.delete(branch_id).await? {
            return Err(not_found(branch_id));
        }

        info!(branch_id, "branch deleted");
        Ok(())
    }

    pub async fn locations(&self) -> AppResult<Vec<BranchLocationResponse>> {
        let locations = self.branch_repo.find_all_locations().await?;
        Ok(locations
            .into_iter()
            .map(BranchLocationResponse::from)
            .collect())
    }

    pub async fn locations_in_town(&self, town: &str) -> AppResult<Vec<BranchLocationResponse>> {
        let town = town.trim();
        if town.is_empty() {
            return Err(AppError::BadRequest("town must not be empty".to_string()));
        }

        let locations = self.branch_repo.find_locations_by_town(town).await?;
        Ok(locations
            .into_iter()
            .map(BranchLocationResponse::from)
            .collect())
    }

    pub async fn locations_within(
        &self,
        origin: GeoPoint,
        radius_km: f64,
    ) -> AppResult<Vec<BranchLocationResponse>> {
        let locations = self.branch_repo.find_all_locations().await?;
        Ok(geo::within_radius(locations, origin, radius_km)
            .into_iter()
            .map(BranchLocationResponse::from)
            .collect())
    }

    pub async fn nearest_locations(
        &self,
        origin: GeoPoint,
        exclude_id: Option<i32>,
    ) -> AppResult<Vec<BranchLocationResponse>> {
        let locations = self.branch_repo.find_all_locations().await?;
        let query = nearest_query(&self.search, exclude_id);
        Ok(geo::nearest(locations, origin, &query)
            .into_iter()
            .map(BranchLocationResponse::from)
            .collect())
    }

    pub async fn accessibility(&self, branch_id: i32) -> AppResult<AccessibilityResponse> {
        let row = self
            .branch_repo
            .find_accessibility(branch_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("no accessibility record for branch {branch_id}"))
            })?;
        Ok(row.into())
    }

    /// Branches offering every named feature.
    pub async fn filter_accessibility(
        &self,
        options: Option<&str>,
    ) -> AppResult<Vec<AccessibilityResponse>> {
        let raw = options
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest(ACCESSIBILITY_USAGE.to_string()))?;
        let features = AccessibilityFeature::parse_list(raw)?;

        let rows = self.branch_repo.filter_accessibility(&features).await?;
        Ok(rows.into_iter().map(AccessibilityResponse::from).collect())
    }

    pub async fn availability(&self) -> AppResult<Vec<AvailabilityResponse>> {
        let rows = self.branch_repo.find_all_availability().await?;
        Ok(rows.into_iter().map(AvailabilityResponse::from).collect())
    }

    pub async fn availability_by_id(&self, branch_id: i32) -> AppResult<AvailabilityResponse> {
        let row = self
            .branch_repo
            .find_availability(branch_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("no availability record for branch {branch_id}"))
            })?;
        Ok(row.into())
    }

    /// Branches open at `time` on at least one day of the week.
    pub async fn filter_availability(
        &self,
        time: Option<&str>,
    ) -> AppResult<Vec<AvailabilityResponse>> {
        let raw = time
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest(AVAILABILITY_USAGE.to_string()))?;
        let time = parse_time_of_day(raw)?;

        let rows = self.branch_repo.filter_availability(time).await?;
        Ok(rows.into_iter().map(AvailabilityResponse::from).collect())
    }

    async fn find_existing(&self, branch_id: i32) -> AppResult<Branch> {
        self.branch_repo
            .find_by_id(branch_id)
            .await?
            .ok_or_else(|| not_found(branch_id))
    }
}

fn not_found(branch_id: i32) -> AppError {
    AppError::NotFound(format!("branch {branch_id} not found"))
}
