use async_trait::async_trait;
use chrono::NaiveTime;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::availability::{hours_columns, WEEK};
use crate::domain::{
    AccessibilityFeature, Branch, BranchAccessibility, BranchAvailability, BranchLocation,
};
use crate::error::AppResult;

use super::traits::BranchRepository;

const BRANCH_COLUMNS: &str = "branch_id, name, phone_number";
const LOCATION_COLUMNS: &str = "branch_id, latitude, longitude, address, town, postcode";
const ACCESSIBILITY_COLUMNS: &str = "branch_id, internal_ramp, external_ramp, automatic_doors, \
     hearing_loop, low_level_counter, accessible_toilet, accessible_parking, wheelchair_access";
const AVAILABILITY_COLUMNS: &str = "branch_id, monday_open, monday_close, tuesday_open, \
     tuesday_close, wednesday_open, wednesday_close, thursday_open, thursday_close, \
     friday_open, friday_close, saturday_open, saturday_close, sunday_open, sunday_close";

pub struct BranchRepositoryImpl {
    pool: PgPool,
}

impl BranchRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BranchRepository for BranchRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Branch>> {
        let branches = sqlx::query_as::<_, Branch>(&format!(
            "SELECT {BRANCH_COLUMNS} FROM branches ORDER BY branch_id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(branches)
    }

    async fn find_by_id(&self, branch_id: i32) -> AppResult<Option<Branch>> {
        let branch = sqlx::query_as::<_, Branch>(&format!(
            "SELECT {BRANCH_COLUMNS} FROM branches WHERE branch_id = $1"
        ))
        .bind(branch_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(branch)
    }

    async fn create(&self, branch: &Branch) -> AppResult<Branch> {
        let created = sqlx::query_as::<_, Branch>(&format!(
            "INSERT INTO branches (branch_id, name, phone_number) VALUES ($1, $2, $3) \
             RETURNING {BRANCH_COLUMNS}"
        ))
        .bind(branch.branch_id)
        .bind(&branch.name)
        .bind(&branch.phone_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, branch: &Branch) -> AppResult<Option<Branch>> {
        let updated = sqlx::query_as::<_, Branch>(&format!(
            "UPDATE branches SET name = $2, phone_number = $3 WHERE branch_id = $1 \
             RETURNING {BRANCH_COLUMNS}"
        ))
        .bind(branch.branch_id)
        .bind(&branch.name)
        .bind(&branch.phone_number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, branch_id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM branches WHERE branch_id = $1")
            .bind(branch_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_all_locations(&self) -> AppResult<Vec<BranchLocation>> {
        let locations = sqlx::query_as::<_, BranchLocation>(&format!(
            "SELECT {LOCATION_COLUMNS} FROM branch_locations ORDER BY branch_id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(locations)
    }

    async fn find_locations_by_town(&self, town: &str) -> AppResult<Vec<BranchLocation>> {
        let locations = sqlx::query_as::<_, BranchLocation>(&format!(
            "SELECT {LOCATION_COLUMNS} FROM branch_locations \
             WHERE LOWER(town) = LOWER($1) ORDER BY branch_id"
        ))
        .bind(town.trim())
        .fetch_all(&self.pool)
        .await?;
        Ok(locations)
    }

    async fn find_all_accessibility(&self) -> AppResult<Vec<BranchAccessibility>> {
        let rows = sqlx::query_as::<_, BranchAccessibility>(&format!(
            "SELECT {ACCESSIBILITY_COLUMNS} FROM branch_accessibility ORDER BY branch_id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_accessibility(&self, branch_id: i32) -> AppResult<Option<BranchAccessibility>> {
        let row = sqlx::query_as::<_, BranchAccessibility>(&format!(
            "SELECT {ACCESSIBILITY_COLUMNS} FROM branch_accessibility WHERE branch_id = $1"
        ))
        .bind(branch_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn filter_accessibility(
        &self,
        features: &[AccessibilityFeature],
    ) -> AppResult<Vec<BranchAccessibility>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {ACCESSIBILITY_COLUMNS} FROM branch_accessibility WHERE TRUE"
        ));
        // Column identifiers come from the allow-list only.
        for feature in features {
            builder.push(" AND ");
            builder.push(feature.column());
            builder.push(" = TRUE");
        }
        builder.push(" ORDER BY branch_id");

        let rows = builder
            .build_query_as::<BranchAccessibility>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_all_availability(&self) -> AppResult<Vec<BranchAvailability>> {
        let rows = sqlx::query_as::<_, BranchAvailability>(&format!(
            "SELECT {AVAILABILITY_COLUMNS} FROM branch_availability ORDER BY branch_id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_availability(&self, branch_id: i32) -> AppResult<Option<BranchAvailability>> {
        let row = sqlx::query_as::<_, BranchAvailability>(&format!(
            "SELECT {AVAILABILITY_COLUMNS} FROM branch_availability WHERE branch_id = $1"
        ))
        .bind(branch_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn filter_availability(&self, time: NaiveTime) -> AppResult<Vec<BranchAvailability>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {AVAILABILITY_COLUMNS} FROM branch_availability WHERE "
        ));
        let mut any_day = builder.separated(" OR ");
        for day in WEEK {
            let (open, close) = hours_columns(day);
            any_day.push(format!("({open} <= "));
            any_day.push_bind_unseparated(time);
            any_day.push_unseparated(format!(" AND {close} >= "));
            any_day.push_bind_unseparated(time);
            any_day.push_unseparated(")");
        }
        builder.push(" ORDER BY branch_id");

        let rows = builder
            .build_query_as::<BranchAvailability>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
