/*
 * Responsibility
 * - /vehicles 系 handler (自分の車両だけを読める・作れる)
 * - 認証主体は CurrentIdentity から受け取る (無ければ 401)
 * - 他人の車両は存在しないものとして扱う (404)
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    api::{
        dto::vehicles::{CreateVehicleRequest, VehicleResponse},
        extractors::{CurrentIdentity, public_id::PublicVehicleId},
    },
    error::AppError,
    repos::vehicle_repo::VehicleRow,
    state::AppState,
};

fn row_to_response(state: &AppState, row: VehicleRow) -> Result<VehicleResponse, AppError> {
    Ok(VehicleResponse {
        id: state.id_codec.encode(row.vehicle_id)?,
        owner_subject: row.owner_subject,
        make: row.make,
        model: row.model,
        plate_no: row.plate_no,
        year: row.year,
        created_at: row.created_at,
    })
}

pub async fn list_my_vehicles(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let rows = state.vehicles.find_by_owner(identity.subject()).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn create_vehicle(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    payload: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;

    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_VEHICLE", msg))?;

    if req.has_server_assigned_fields() {
        tracing::debug!(
            subject = identity.subject(),
            "discarding client-supplied id/ownerSubject"
        );
    }

    let row = state
        .vehicles
        .save(req.into_new_vehicle(identity.subject()))
        .await?;

    let res = row_to_response(&state, row)?;
    let location = format!("/api/vehicles/{}", res.id);

    tracing::info!(subject = identity.subject(), vehicle_id = %res.id, "vehicle created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(res),
    ))
}

pub async fn get_my_vehicle(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    vehicle_id: PublicVehicleId,
) -> Result<Json<VehicleResponse>, AppError> {
    let row = state
        .vehicles
        .find_by_id_and_owner(vehicle_id.id, identity.subject())
        .await?
        .ok_or_else(|| AppError::not_found("vehicle"))?;

    Ok(Json(row_to_response(&state, row)?))
}
