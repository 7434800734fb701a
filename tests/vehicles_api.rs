#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests for the vehicle resource behind the bearer gate.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::{Value, json};

use common::{ISSUER, app, bearer_for, mint, mint_with_secret, send, send_raw};

#[tokio::test]
async fn create_ignores_client_supplied_id_and_owner() {
    let app = app().await;
    let token = mint(json!({"sub": "user-42", "iss": ISSUER, "role": "customer"}));
    let auth = format!("Bearer {token}");

    let res = send(
        &app,
        "POST",
        "/api/vehicles",
        Some(&auth),
        Some(json!({
            "id": 999,
            "ownerSubject": "someone-else",
            "make": "Toyota",
            "model": "Corolla",
            "plateNo": "CAB-1234",
            "year": 2019
        })),
    )
    .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["ownerSubject"], "user-42");
    assert_eq!(res.body["make"], "Toyota");

    let id = res.body["id"].as_str().expect("public id");
    assert_ne!(id, "999");
    assert_eq!(
        res.headers.get("location").unwrap(),
        &format!("/api/vehicles/{id}")
    );

    // The Location header resolves for the owner.
    let location = res.headers["location"].to_str().unwrap().to_string();
    let fetched = send(&app, "GET", &location, Some(&auth), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["id"], id);
    assert_eq!(fetched.body["ownerSubject"], "user-42");

    // Nothing was stored under the spoofed owner.
    let others = send(&app, "GET", "/api/vehicles", Some(&bearer_for("someone-else")), None).await;
    assert_eq!(others.status, StatusCode::OK);
    assert_eq!(others.body, json!([]));
}

#[tokio::test]
async fn list_without_authorization_is_401_without_data() {
    let app = app().await;

    let res = send(&app, "GET", "/api/vehicles", None, None).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert!(!res.body.is_array());
    assert_eq!(res.body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn create_without_authorization_is_401_and_stores_nothing() {
    let app = app().await;

    let res = send(
        &app,
        "POST",
        "/api/vehicles",
        None,
        Some(json!({"make": "Honda", "ownerSubject": "user-42"})),
    )
    .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert!(res.headers.get("location").is_none());

    let mine = send(&app, "GET", "/api/vehicles", Some(&bearer_for("user-42")), None).await;
    assert_eq!(mine.body, json!([]));
}

#[tokio::test]
async fn listing_is_scoped_to_the_caller() {
    let app = app().await;
    let alice = bearer_for("alice");
    let bob = bearer_for("bob");

    for make in ["Toyota", "Mazda"] {
        let res = send(&app, "POST", "/api/vehicles", Some(&alice), Some(json!({"make": make}))).await;
        assert_eq!(res.status, StatusCode::CREATED);
    }
    let res = send(&app, "POST", "/api/vehicles", Some(&bob), Some(json!({"make": "Honda"}))).await;
    assert_eq!(res.status, StatusCode::CREATED);

    let mine = send(&app, "GET", "/api/vehicles", Some(&alice), None).await;
    assert_eq!(mine.status, StatusCode::OK);

    let vehicles = mine.body.as_array().unwrap();
    assert_eq!(vehicles.len(), 2);
    assert!(vehicles.iter().all(|v| v["ownerSubject"] == "alice"));
    let makes: Vec<&str> = vehicles.iter().filter_map(|v| v["make"].as_str()).collect();
    assert_eq!(makes, ["Toyota", "Mazda"]);
}

#[tokio::test]
async fn another_subjects_vehicle_is_not_found() {
    let app = app().await;

    let created = send(
        &app,
        "POST",
        "/api/vehicles",
        Some(&bearer_for("alice")),
        Some(json!({"make": "Toyota"})),
    )
    .await;
    let location = created.headers["location"].to_str().unwrap().to_string();

    let res = send(&app, "GET", &location, Some(&bearer_for("bob")), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = send(&app, "GET", &location, None, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_public_id_is_400() {
    let app = app().await;

    let res = send(&app, "GET", "/api/vehicles/!!!", Some(&bearer_for("alice")), None).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["code"], "INVALID_PUBLIC_ID");
}

#[tokio::test]
async fn invalid_payload_is_400() {
    let app = app().await;

    let res = send(
        &app,
        "POST",
        "/api/vehicles",
        Some(&bearer_for("alice")),
        Some(json!({"make": "   ", "year": 2020})),
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["code"], "INVALID_VEHICLE");
}

#[tokio::test]
async fn malformed_json_body_is_400_with_error_envelope() {
    let app = app().await;
    let alice = bearer_for("alice");

    let res = send_raw(
        &app,
        "POST",
        "/api/vehicles",
        Some(&alice),
        Some("application/json"),
        "{\"make\": ",
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["code"], "INVALID_BODY");

    let res = send_raw(&app, "POST", "/api/vehicles", Some(&alice), None, "{}").await;
    assert_eq!(res.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(res.body["error"]["code"], "INVALID_BODY");

    let mine = send(&app, "GET", "/api/vehicles", Some(&alice), None).await;
    assert_eq!(mine.body, json!([]));
}

#[tokio::test]
async fn rejected_tokens_degrade_to_anonymous() {
    let app = app().await;
    let expired = mint(json!({
        "sub": "user-42",
        "iss": ISSUER,
        "exp": Utc::now().timestamp() - 60
    }));
    let wrong_issuer = mint(json!({"sub": "user-42", "iss": "elsewhere"}));
    let wrong_key = mint_with_secret(
        "a-completely-different-secret-value!",
        json!({"sub": "user-42", "iss": ISSUER}),
    );

    for token in [expired, wrong_issuer, wrong_key, "garbage".to_string()] {
        let auth = format!("Bearer {token}");

        // The gate itself never rejects...
        let health = send(&app, "GET", "/health", Some(&auth), None).await;
        assert_eq!(health.status, StatusCode::OK);

        // ...the resource does, because no identity was established.
        let res = send(&app, "GET", "/api/vehicles", Some(&auth), None).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn token_without_expiry_is_accepted() {
    let app = app().await;
    let token = mint(json!({"sub": "user-42", "iss": ISSUER}));

    let res = send(&app, "GET", "/api/vehicles", Some(&format!("Bearer {token}")), None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, Value::Array(vec![]));
}

#[tokio::test]
async fn token_with_fractional_expiry_is_accepted() {
    let app = app().await;
    let exp = Utc::now().timestamp() as f64 + 3600.5;
    let token = mint(json!({"sub": "user-42", "iss": ISSUER, "exp": exp}));

    let res = send(&app, "GET", "/api/vehicles", Some(&format!("Bearer {token}")), None).await;

    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = app().await;

    let res = send(&app, "GET", "/health", None, None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.headers.contains_key("x-request-id"));
    assert_eq!(res.headers["x-content-type-options"], "nosniff");
    assert_eq!(res.headers["x-frame-options"], "DENY");
}
