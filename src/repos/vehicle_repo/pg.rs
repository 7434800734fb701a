use async_trait::async_trait;
use sqlx::PgPool;

use super::{NewVehicle, VehicleRepo, VehicleRow};
use crate::repos::error::RepoError;

#[derive(Debug, Clone)]
pub struct PgVehicleRepo {
    db: PgPool,
}

impl PgVehicleRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VehicleRepo for PgVehicleRepo {
    async fn find_by_owner(&self, owner_subject: &str) -> Result<Vec<VehicleRow>, RepoError> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT
                "vehicleId", "ownerSubject", make, model, "plateNo", year, "createdAt"
            FROM vehicles
            WHERE "ownerSubject" = $1
            ORDER BY "vehicleId"
            "#,
        )
        .bind(owner_subject)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn find_by_id_and_owner(
        &self,
        vehicle_id: i64,
        owner_subject: &str,
    ) -> Result<Option<VehicleRow>, RepoError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT
                "vehicleId", "ownerSubject", make, model, "plateNo", year, "createdAt"
            FROM vehicles
            WHERE "vehicleId" = $1 AND "ownerSubject" = $2
            "#,
        )
        .bind(vehicle_id)
        .bind(owner_subject)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn save(&self, vehicle: NewVehicle) -> Result<VehicleRow, RepoError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicles ("ownerSubject", make, model, "plateNo", year)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING
                "vehicleId", "ownerSubject", make, model, "plateNo", year, "createdAt"
            "#,
        )
        .bind(&vehicle.owner_subject)
        .bind(vehicle.make.as_deref())
        .bind(vehicle.model.as_deref())
        .bind(vehicle.plate_no.as_deref())
        .bind(vehicle.year)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }
}
