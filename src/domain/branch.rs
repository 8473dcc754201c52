use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::geo::{GeoPoint, Located};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Branch {
    pub branch_id: i32,
    pub name: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BranchLocation {
    pub branch_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub town: Option<String>,
    pub postcode: Option<String>,
}

impl BranchLocation {
    pub fn in_town(&self, town: &str) -> bool {
        self.town
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case(town.trim()))
    }
}

impl Located for BranchLocation {
    type Id = i32;

    fn id(&self) -> i32 {
        self.branch_id
    }

    fn point(&self) -> GeoPoint {
        GeoPoint::new_unchecked(self.latitude, self.longitude)
    }
}
