/*
 * Responsibility
 * - 公開 ID ↔ 内部 ID の変換 (encode/decode)
 * - vehicles の内部 ID (BIGINT) をそのまま URL / Location ヘッダに出さない
 */
use sqids::Sqids;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdCodecError>;

#[derive(Debug, Error)]
pub enum IdCodecError {
    #[error("SQIDS_MIN_LENGTH must be between 0 and 255, got {0}")]
    InvalidMinLength(usize),
    #[error("sqids error: {0}")]
    Sqids(#[from] sqids::Error),
    #[error("id must be non-negative, got {0}")]
    NegativeId(i64),
    #[error("invalid public id")]
    Malformed,
}

#[derive(Clone, Debug)]
pub struct IdCodec {
    sqids: Sqids,
}

impl IdCodec {
    pub fn new(min_length: usize, alphabet: &str) -> Result<Self> {
        let min_length: u8 = min_length
            .try_into()
            .map_err(|_| IdCodecError::InvalidMinLength(min_length))?;

        let sqids = Sqids::builder()
            .min_length(min_length)
            .alphabet(alphabet.chars().collect())
            .build()?;

        Ok(Self { sqids })
    }

    pub fn encode(&self, id: i64) -> Result<String> {
        let n = u64::try_from(id).map_err(|_| IdCodecError::NegativeId(id))?;
        Ok(self.sqids.encode(&[n])?)
    }

    /// Decode a public id. Only the canonical encoding is accepted, so one
    /// vehicle is never reachable under two different URLs.
    pub fn decode(&self, public_id: &str) -> Result<i64> {
        let nums = self.sqids.decode(public_id);
        let [n] = nums[..] else {
            return Err(IdCodecError::Malformed);
        };
        let id = i64::try_from(n).map_err(|_| IdCodecError::Malformed)?;

        if self.sqids.encode(&[n])? != public_id {
            return Err(IdCodecError::Malformed);
        }
        Ok(id)
    }
}
