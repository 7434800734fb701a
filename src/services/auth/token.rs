use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::config::JwtSettings;
use crate::services::auth::Identity;

const BEARER_PREFIX: &str = "Bearer ";

/// Every way a presented bearer token can fail verification.
///
/// Callers outside this module only ever see the collapsed outcome
/// (`authenticate` returns `None`); the variants exist for diagnostics.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("missing or empty 'sub' claim")]
    MissingSubject,
    #[error("token expired at {exp}")]
    Expired { exp: i64 },
}

// `iss` and `nbf` are checked by `Validation`; only what becomes part of the
// identity (plus `exp`, which we check ourselves) is deserialized here.
#[derive(Debug, Clone, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default, deserialize_with = "numeric_date")]
    exp: Option<i64>,
    #[serde(default)]
    role: Option<String>,
}

/// HMAC bearer-token verifier.
///
/// - Key material is intentionally not printable via Debug.
/// - Read-only after construction; shared across requests behind an `Arc`.
#[derive(Clone)]
pub struct TokenAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthenticator")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenAuthenticator {
    pub fn new(secret: &str, issuer: &str, algorithm: Algorithm) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[issuer]);
        // `exp` is optional: absent means no expiry constraint.
        validation.set_required_spec_claims(&["iss"]);
        // Expiry is enforced in `verify_at` as a strict `exp > now`.
        validation.validate_exp = false;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn from_settings(settings: &JwtSettings) -> Self {
        Self::new(&settings.secret, &settings.issuer, settings.algorithm)
    }

    /// Resolve the identity asserted by the request's `Authorization` header.
    ///
    /// `None` covers both "no bearer credential" and "credential failed
    /// verification"; neither aborts the request.
    pub fn authenticate(&self, headers: &HeaderMap) -> Option<Identity> {
        let token = bearer_token(headers)?;

        match self.verify(token) {
            Ok(identity) => {
                tracing::debug!(subject = identity.subject(), "bearer token verified");
                Some(identity)
            }
            Err(err) => {
                tracing::debug!(error = %err, "bearer token rejected, continuing as anonymous");
                None
            }
        }
    }

    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Signature, algorithm, `iss` and `nbf` via jsonwebtoken, then `exp` and `sub`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, TokenError> {
        let claims =
            jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?
                .claims;

        if let Some(exp) = claims.exp
            && exp <= now.timestamp()
        {
            return Err(TokenError::Expired { exp });
        }

        let subject = claims
            .sub
            .filter(|s| !s.trim().is_empty())
            .ok_or(TokenError::MissingSubject)?;

        Ok(Identity::new(subject, claims.role))
    }
}

// NumericDate: any JSON number of seconds, fractions truncated.
// Values past the i64 range saturate.
fn numeric_date<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = Option::<f64>::deserialize(deserializer)?;
    Ok(secs.map(|s| s.trunc() as i64))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
}
