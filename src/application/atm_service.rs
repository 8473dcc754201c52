use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::api::dtos::{
    AtmCreatedResponse, AtmLocationResponse, AtmResponse, CreateAtmRequest, UpdateAtmRequest,
};
use crate::application::nearest_query;
use crate::config::SearchConfig;
use crate::domain::Atm;
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::AtmRepository;
use crate::utils::geo::{self, GeoPoint};

#[derive(Clone)]
pub struct AtmService {
    atm_repo: Arc<dyn AtmRepository>,
    search: SearchConfig,
}

impl AtmService {
    pub fn new(atm_repo: Arc<dyn AtmRepository>, search: SearchConfig) -> Self {
        Self { atm_repo, search }
    }

    pub async fn list(&self) -> AppResult<Vec<AtmResponse>> {
        let atms = self.atm_repo.find_all().await?;
        Ok(atms.into_iter().map(AtmResponse::from).collect())
    }

    pub async fn get_by_id(&self, atm_id: i32) -> AppResult<AtmResponse> {
        let atm = self.find_existing(atm_id).await?;
        Ok(atm.into())
    }

    pub async fn create(&self, request: CreateAtmRequest) -> AppResult<AtmCreatedResponse> {
        request.validate()?;

        let created = self.atm_repo.create(&request.into_atm()).await?;

        info!(atm_id = created.atm_id, branch_id = ?created.branch_id, "atm created");
        Ok(AtmCreatedResponse {
            atm_id: created.atm_id,
        })
    }

    pub async fn update(&self, atm_id: i32, request: UpdateAtmRequest) -> AppResult<AtmResponse> {
        request.validate()?;
        self.find_existing(atm_id).await?;

        let updated = self
            .atm_repo
            .update(&request.into_atm(atm_id))
            .await?
            .ok_or_else(|| not_found(atm_id))?;

        info!(atm_id, "atm updated");
        Ok(updated.into())
    }

    pub async fn delete(&self, atm_id: i32) -> AppResult<()> {
        self.find_existing(atm_id).await?;

        if !self.atm_repo.delete(atm_id).await? {
            return Err(not_found(atm_id));
        }

        info!(atm_id, "atm deleted");
        Ok(())
    }

    pub async fn locations(&self) -> AppResult<Vec<AtmLocationResponse>> {
        let locations = self.atm_repo.find_all_locations().await?;
        Ok(locations.into_iter().map(AtmLocationResponse::from).collect())
    }

    pub async fn locations_within(
        &self,
        origin: GeoPoint,
        radius_km: f64,
    ) -> AppResult<Vec<AtmLocationResponse>> {
        let locations = self.atm_repo.find_all_locations().await?;
        Ok(geo::within_radius(locations, origin, radius_km)
            .into_iter()
            .map(AtmLocationResponse::from)
            .collect())
    }

    pub async fn nearest_locations(
        &self,
        origin: GeoPoint,
        exclude_id: Option<i32>,
    ) -> AppResult<Vec<AtmLocationResponse>> {
        let locations = self.atm_repo.find_all_locations().await?;
        let query = nearest_query(&self.search, exclude_id);
        Ok(geo::nearest(locations, origin, &query)
            .into_iter()
            .map(AtmLocationResponse::from)
            .collect())
    }

    async fn find_existing(&self, atm_id: i32) -> AppResult<Atm> {
        self.atm_repo
            .find_by_id(atm_id)
            .await?
            .ok_or_else(|| not_found(atm_id))
    }
}

fn not_found(atm_id: i32) -> AppError {
    AppError::NotFound(format!("atm {atm_id} not found"))
}
