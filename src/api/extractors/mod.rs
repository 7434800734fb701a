/*
 * Responsibility
 * - handler 向け extractor の公開ポイント
 */
mod identity;
pub mod public_id;

pub use identity::CurrentIdentity;
