use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::geo::{GeoPoint, Located};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Atm {
    pub atm_id: i32,
    pub branch_id: Option<i32>,
    pub open_24_hours: bool,
    pub minimum_withdrawal: Decimal,
    /// Sited outside a branch building.
    pub is_external: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AtmLocation {
    pub atm_id: i32,
    pub latitude: f64,
    pub longitude: f64,
}

impl Located for AtmLocation {
    type Id = i32;

    fn id(&self) -> i32 {
        self.atm_id
    }

    fn point(&self) -> GeoPoint {
        GeoPoint::new_unchecked(self.latitude, self.longitude)
    }
}
