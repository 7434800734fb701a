//! Bearer token gate: header extraction → verification → IdentityContext.
//!
//! Runs once per request, before any handler. It never rejects a request:
//! a missing or invalid token leaves the request anonymous, and each handler
//! decides whether anonymous access is acceptable (see `CurrentIdentity`).

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::services::auth::IdentityContext;
use crate::state::AppState;

/// Apply the bearer gate to every route of `router`.
///
/// ```ignore
/// let router = middleware::bearer_auth::apply(router, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, bearer_auth_middleware))
}

async fn bearer_auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let identity = state.auth.authenticate(req.headers());

    // Whatever an outer layer may have put here is overwritten.
    let mut ctx = req
        .extensions_mut()
        .remove::<IdentityContext>()
        .unwrap_or_default();

    match identity {
        Some(identity) => ctx.set(identity),
        None => ctx.clear(),
    }

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(ctx);

    next.run(req).await
}
