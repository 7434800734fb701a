/*
 * Responsibility
 * - vehicles の永続化インターフェース (owner 単位でしか読めない)
 * - 実装: PostgreSQL (sqlx) / in-memory (DATABASE_URL 未設定時・テスト)
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::repos::error::RepoError;

mod memory;
mod pg;

pub use memory::InMemoryVehicleRepo;
pub use pg::PgVehicleRepo;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct VehicleRow {
    #[sqlx(rename = "vehicleId")]
    pub vehicle_id: i64,

    #[sqlx(rename = "ownerSubject")]
    pub owner_subject: String,

    pub make: Option<String>,
    pub model: Option<String>,

    #[sqlx(rename = "plateNo")]
    pub plate_no: Option<String>,

    pub year: Option<i32>,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A vehicle about to be stored. There is no id field: ids come from the store.
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub owner_subject: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub plate_no: Option<String>,
    pub year: Option<i32>,
}

#[async_trait]
pub trait VehicleRepo: Send + Sync + 'static {
    async fn find_by_owner(&self, owner_subject: &str) -> Result<Vec<VehicleRow>, RepoError>;

    async fn find_by_id_and_owner(
        &self,
        vehicle_id: i64,
        owner_subject: &str,
    ) -> Result<Option<VehicleRow>, RepoError>;

    async fn save(&self, vehicle: NewVehicle) -> Result<VehicleRow, RepoError>;
}
