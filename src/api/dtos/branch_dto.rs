use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::dtos::common::format_time;
use crate::domain::{Branch, BranchAccessibility, BranchAvailability, BranchLocation};
use crate::utils::geo::Ranked;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchResponse {
    pub branch_id: i32,
    pub name: String,
    pub phone_number: String,
}

impl From<Branch> for BranchResponse {
    fn from(branch: Branch) -> Self {
        Self {
            branch_id: branch.branch_id,
            name: branch.name,
            phone_number: branch.phone_number,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchRequest {
    #[validate(range(min = 1))]
    pub branch_id: i32,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 3, max = 32))]
    pub phone_number: String,
}

impl CreateBranchRequest {
    /// Strips surrounding whitespace so length rules apply to the stored text.
    pub fn trimmed(self) -> Self {
        Self {
            branch_id: self.branch_id,
            name: self.name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBranchRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 3, max = 32))]
    pub phone_number: String,
}

impl UpdateBranchRequest {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchCreatedResponse {
    pub branch_id: i32,
}

/// A branch position. `distanceKm` is only present on search results.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchLocationResponse {
    pub branch_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub town: Option<String>,
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl From<BranchLocation> for BranchLocationResponse {
    fn from(location: BranchLocation) -> Self {
        Self {
            branch_id: location.branch_id,
            latitude: location.latitude,
            longitude: location.longitude,
            address: location.address,
            town: location.town,
            postcode: location.postcode,
            distance_km: None,
        }
    }
}

impl From<Ranked<BranchLocation>> for BranchLocationResponse {
    fn from(ranked: Ranked<BranchLocation>) -> Self {
        Self {
            distance_km: Some(ranked.distance_km),
            ..Self::from(ranked.item)
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityResponse {
    pub branch_id: i32,
    pub internal_ramp: bool,
    pub external_ramp: bool,
    pub automatic_doors: bool,
    pub hearing_loop: bool,
    pub low_level_counter: bool,
    pub accessible_toilet: bool,
    pub accessible_parking: bool,
    pub wheelchair_access: bool,
}

impl From<BranchAccessibility> for AccessibilityResponse {
    fn from(row: BranchAccessibility) -> Self {
        Self {
            branch_id: row.branch_id,
            internal_ramp: row.internal_ramp,
            external_ramp: row.external_ramp,
            automatic_doors: row.automatic_doors,
            hearing_loop: row.hearing_loop,
            low_level_counter: row.low_level_counter,
            accessible_toilet: row.accessible_toilet,
            accessible_parking: row.accessible_parking,
            wheelchair_access: row.wheelchair_access,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AccessibilityQueryParams {
    /// Comma-separated feature names, e.g. `InternalRamp,HearingLoop`
    pub options: Option<String>,
}

/// Opening hours as `HH:MM`; a day with a missing bound is closed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub branch_id: i32,
    pub monday_open: Option<String>,
    pub monday_close: Option<String>,
    pub tuesday_open: Option<String>,
    pub tuesday_close: Option<String>,
    pub wednesday_open: Option<String>,
    pub wednesday_close: Option<String>,
    pub thursday_open: Option<String>,
    pub thursday_close: Option<String>,
    pub friday_open: Option<String>,
    pub friday_close: Option<String>,
    pub saturday_open: Option<String>,
    pub saturday_close: Option<String>,
    pub sunday_open: Option<String>,
    pub sunday_close: Option<String>,
}

impl From<BranchAvailability> for AvailabilityResponse {
    fn from(row: BranchAvailability) -> Self {
        Self {
            branch_id: row.branch_id,
            monday_open: format_time(row.monday_open),
            monday_close: format_time(row.monday_close),
            tuesday_open: format_time(row.tuesday_open),
            tuesday_close: format_time(row.tuesday_close),
            wednesday_open: format_time(row.wednesday_open),
            wednesday_close: format_time(row.wednesday_close),
            thursday_open: format_time(row.thursday_open),
            thursday_close: format_time(row.thursday_close),
            friday_open: format_time(row.friday_open),
            friday_close: format_time(row.friday_close),
            saturday_open: format_time(row.saturday_open),
            saturday_close: format_time(row.saturday_close),
            sunday_open: format_time(row.sunday_open),
            sunday_close: format_time(row.sunday_close),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityFilterParams {
    /// Time of day, `HH:MM` or `HH:MM:SS`
    pub time: Option<String>,
}
