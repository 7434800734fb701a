/*
 * Responsibility
 * - Vehicles の request/response DTO (JSON は camelCase, フロントエンドの型に合わせる)
 * - 公開 ID は encode 済みの値を返す (内部 ID を漏らさない)
 * - id / ownerSubject はサーバー側で決める。クライアントが送っても捨てる
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::vehicle_repo::NewVehicle;

const MAX_TEXT_LEN: usize = 64;
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1886..=9999;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    // Accepted only so they can be discarded; never copied into the entity.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub owner_subject: Option<serde_json::Value>,

    pub make: Option<String>,
    pub model: Option<String>,
    pub plate_no: Option<String>,
    pub year: Option<i32>,
}

fn check_text(field: &'static str, value: Option<&str>) -> Result<(), String> {
    match value {
        Some(v) if v.trim().is_empty() => Err(format!("{field} cannot be empty")),
        Some(v) if v.chars().count() > MAX_TEXT_LEN => {
            Err(format!("{field} must be <= {MAX_TEXT_LEN} chars"))
        }
        _ => Ok(()),
    }
}

impl CreateVehicleRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_text("make", self.make.as_deref())?;
        check_text("model", self.model.as_deref())?;
        check_text("plateNo", self.plate_no.as_deref())?;

        if let Some(year) = self.year
            && !YEAR_RANGE.contains(&year)
        {
            return Err(format!(
                "year must be between {} and {}",
                YEAR_RANGE.start(),
                YEAR_RANGE.end()
            ));
        }

        Ok(())
    }

    pub fn has_server_assigned_fields(&self) -> bool {
        self.id.is_some() || self.owner_subject.is_some()
    }

    /// Build the entity to store, owned by `owner_subject`.
    pub fn into_new_vehicle(self, owner_subject: &str) -> NewVehicle {
        let trimmed = |v: Option<String>| v.map(|s| s.trim().to_string());

        NewVehicle {
            owner_subject: owner_subject.to_string(),
            make: trimmed(self.make),
            model: trimmed(self.model),
            plate_no: trimmed(self.plate_no),
            year: self.year,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: String, // encoded
    pub owner_subject: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub plate_no: Option<String>,
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
}
