/*
 * Responsibility
 * - /api の URL 構造を定義
 * - 認証 (bearer gate) は app 側で Router 全体に掛ける。認証必須かどうかは handler の extractor で決まる
 */
use axum::{Router, routing::get};

use crate::api::handlers::vehicles::{create_vehicle, get_my_vehicle, list_my_vehicles};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(list_my_vehicles).post(create_vehicle))
        .route("/vehicles/{vehicle_id}", get(get_my_vehicle))
}
