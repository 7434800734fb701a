//! Customer service: bearer-token gate and owner-scoped vehicle resource.
//!
//! Every request passes through [`middleware::bearer_auth`], which verifies an
//! optional `Authorization: Bearer <jwt>` and records the outcome in a
//! per-request [`services::auth::IdentityContext`]. Verification failures never
//! reject a request; handlers that need an identity ask for
//! [`api::extractors::CurrentIdentity`] and answer 401 themselves.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
