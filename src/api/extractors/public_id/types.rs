/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *  - decode ロジック / extractor 実装はここに置かない (core 側)
 */
use super::core::PublicId;

// vehicles
pub enum VehicleTag {}
pub type PublicVehicleId = PublicId<VehicleTag>;
