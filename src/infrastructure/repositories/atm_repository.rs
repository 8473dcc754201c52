use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Atm, AtmLocation};
use crate::error::AppResult;

use super::traits::AtmRepository;

const ATM_COLUMNS: &str = "atm_id, branch_id, open_24_hours, minimum_withdrawal, is_external";

pub struct AtmRepositoryImpl {
    pool: PgPool,
}

impl AtmRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AtmRepository for AtmRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Atm>> {
        let atms = sqlx::query_as::<_, Atm>(&format!(
            "SELECT {ATM_COLUMNS} FROM atms ORDER BY atm_id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(atms)
    }

    async fn find_by_id(&self, atm_id: i32) -> AppResult<Option<Atm>> {
        let atm = sqlx::query_as::<_, Atm>(&format!(
            "SELECT {ATM_COLUMNS} FROM atms WHERE atm_id = $1"
        ))
        .bind(atm_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(atm)
    }

    async fn create(&self, atm: &Atm) -> AppResult<Atm> {
        let created = sqlx::query_as::<_, Atm>(&format!(
            "INSERT INTO atms (atm_id, branch_id, open_24_hours, minimum_withdrawal, is_external) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {ATM_COLUMNS}"
        ))
        .bind(atm.atm_id)
        .bind(atm.branch_id)
        .bind(atm.open_24_hours)
        .bind(atm.minimum_withdrawal)
        .bind(atm.is_external)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, atm: &Atm) -> AppResult<Option<Atm>> {
        let updated = sqlx::query_as::<_, Atm>(&format!(
            "UPDATE atms SET branch_id = $2, open_24_hours = $3, minimum_withdrawal = $4, \
             is_external = $5 WHERE atm_id = $1 RETURNING {ATM_COLUMNS}"
        ))
        .bind(atm.atm_id)
        .bind(atm.branch_id)
        .bind(atm.open_24_hours)
        .bind(atm.minimum_withdrawal)
        .bind(atm.is_external)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, atm_id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM atms WHERE atm_id = $1")
            .bind(atm_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_all_locations(&self) -> AppResult<Vec<AtmLocation>> {
        let locations = sqlx::query_as::<_, AtmLocation>(
            "SELECT atm_id, latitude, longitude FROM atm_locations ORDER BY atm_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(locations)
    }
}
