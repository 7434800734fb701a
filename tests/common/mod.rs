#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use customer_service::{app, config::Config};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret-of-32-bytes+";
pub const ISSUER: &str = "revamp";

pub fn config() -> Config {
    Config::from_lookup(|key| match key {
        "SECURITY_JWT_SECRET" => Some(SECRET.to_string()),
        "SECURITY_JWT_ISSUER" => Some(ISSUER.to_string()),
        _ => None,
    })
    .expect("test config")
}

/// Full application router backed by the in-memory vehicle store.
pub async fn app() -> Router {
    let config = config();
    let state = app::build_state(&config).await.expect("state");
    app::build_router(state, &config)
}

pub fn mint_with_secret(secret: &str, claims: Value) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("encode token")
}

pub fn mint(claims: Value) -> String {
    mint_with_secret(SECRET, claims)
}

pub fn bearer_for(subject: &str) -> String {
    let token = mint(serde_json::json!({"sub": subject, "iss": ISSUER, "role": "customer"}));
    format!("Bearer {token}")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        req = req.header("authorization", value);
    }
    let req = match body {
        Some(json) => req
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => req.body(Body::empty()),
    }
    .expect("request");

    dispatch(app, req).await
}

/// Like `send`, but with a verbatim body and an optional content type.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    authorization: Option<&str>,
    content_type: Option<&str>,
    body: &'static str,
) -> TestResponse {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        req = req.header("authorization", value);
    }
    if let Some(value) = content_type {
        req = req.header("content-type", value);
    }
    let req = req.body(Body::from(body)).expect("request");

    dispatch(app, req).await
}

async fn dispatch(app: &Router, req: Request<Body>) -> TestResponse {
    let res = app.clone().oneshot(req).await.expect("response");
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
    }
}
