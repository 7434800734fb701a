use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{NewVehicle, VehicleRepo, VehicleRow};
use crate::repos::error::RepoError;

/// Process-local store used when no database is configured.
///
/// Ids start at 1 and are never reused, like a BIGSERIAL column.
#[derive(Debug)]
pub struct InMemoryVehicleRepo {
    rows: RwLock<Vec<VehicleRow>>,
    next_id: AtomicI64,
}

impl Default for InMemoryVehicleRepo {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl VehicleRepo for InMemoryVehicleRepo {
    async fn find_by_owner(&self, owner_subject: &str) -> Result<Vec<VehicleRow>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|r| r.owner_subject == owner_subject)
            .cloned()
            .collect())
    }

    async fn find_by_id_and_owner(
        &self,
        vehicle_id: i64,
        owner_subject: &str,
    ) -> Result<Option<VehicleRow>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|r| r.vehicle_id == vehicle_id && r.owner_subject == owner_subject)
            .cloned())
    }

    async fn save(&self, vehicle: NewVehicle) -> Result<VehicleRow, RepoError> {
        let mut rows = self.rows.write().await;

        let row = VehicleRow {
            vehicle_id: self.next_id.fetch_add(1, Ordering::Relaxed),
            owner_subject: vehicle.owner_subject,
            make: vehicle.make,
            model: vehicle.model,
            plate_no: vehicle.plate_no,
            year: vehicle.year,
            created_at: Utc::now(),
        };
        rows.push(row.clone());

        Ok(row)
    }
}
