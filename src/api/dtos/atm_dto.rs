use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::{Atm, AtmLocation};
use crate::utils::geo::Ranked;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtmResponse {
    pub atm_id: i32,
    pub branch_id: Option<i32>,
    #[serde(rename = "open24Hours")]
    pub open_24_hours: bool,
    #[schema(value_type = String, example = "10.00")]
    pub minimum_withdrawal: Decimal,
    pub is_external: bool,
}

impl From<Atm> for AtmResponse {
    fn from(atm: Atm) -> Self {
        Self {
            atm_id: atm.atm_id,
            branch_id: atm.branch_id,
            open_24_hours: atm.open_24_hours,
            minimum_withdrawal: atm.minimum_withdrawal,
            is_external: atm.is_external,
        }
    }
}

fn validate_minimum_withdrawal(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount < Decimal::ZERO {
        let mut error = ValidationError::new("range");
        error.message = Some("minimumWithdrawal must not be negative".into());
        return Err(error);
    }
    // Stored as NUMERIC(10, 2); trailing zeros beyond cents are harmless.
    if amount.normalize().scale() > 2 {
        let mut error = ValidationError::new("scale");
        error.message = Some("minimumWithdrawal must have at most two decimal places".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAtmRequest {
    #[validate(range(min = 1))]
    pub atm_id: i32,
    #[validate(range(min = 1))]
    pub branch_id: Option<i32>,
    #[serde(rename = "open24Hours")]
    pub open_24_hours: bool,
    #[validate(custom(function = "validate_minimum_withdrawal"))]
    #[schema(value_type = String, example = "10.00")]
    pub minimum_withdrawal: Decimal,
    pub is_external: bool,
}

impl CreateAtmRequest {
    pub fn into_atm(self) -> Atm {
        Atm {
            atm_id: self.atm_id,
            branch_id: self.branch_id,
            open_24_hours: self.open_24_hours,
            minimum_withdrawal: self.minimum_withdrawal,
            is_external: self.is_external,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAtmRequest {
    #[validate(range(min = 1))]
    pub branch_id: Option<i32>,
    #[serde(rename = "open24Hours")]
    pub open_24_hours: bool,
    #[validate(custom(function = "validate_minimum_withdrawal"))]
    #[schema(value_type = String, example = "10.00")]
    pub minimum_withdrawal: Decimal,
    pub is_external: bool,
}

impl UpdateAtmRequest {
    pub fn into_atm(self, atm_id: i32) -> Atm {
        Atm {
            atm_id,
            branch_id: self.branch_id,
            open_24_hours: self.open_24_hours,
            minimum_withdrawal: self.minimum_withdrawal,
            is_external: self.is_external,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtmCreatedResponse {
    pub atm_id: i32,
}

/// An ATM position. `distanceKm` is only present on search results.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtmLocationResponse {
    pub atm_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl From<AtmLocation> for AtmLocationResponse {
    fn from(location: AtmLocation) -> Self {
        Self {
            atm_id: location.atm_id,
            latitude: location.latitude,
            longitude: location.longitude,
            distance_km: None,
        }
    }
}

impl From<Ranked<AtmLocation>> for AtmLocationResponse {
    fn from(ranked: Ranked<AtmLocation>) -> Self {
        Self {
            distance_km: Some(ranked.distance_km),
            ..Self::from(ranked.item)
        }
    }
}
