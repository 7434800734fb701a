/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: TokenAuthenticator (読み取り専用), vehicles: VehicleRepo, id_codec: IdCodec
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - リクエストごとの認証主体はここに置かない (request extensions の IdentityContext)
 */
use std::sync::Arc;

use crate::repos::vehicle_repo::VehicleRepo;
use crate::services::{auth::TokenAuthenticator, id_codec::IdCodec};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<TokenAuthenticator>,
    pub vehicles: Arc<dyn VehicleRepo>,
    pub id_codec: IdCodec,
}

impl AppState {
    pub fn new(
        auth: Arc<TokenAuthenticator>,
        vehicles: Arc<dyn VehicleRepo>,
        id_codec: IdCodec,
    ) -> Self {
        Self {
            auth,
            vehicles,
            id_codec,
        }
    }
}
