/*
 * Responsibility
 * - Config読み込み → 依存生成 (TokenAuthenticator / VehicleRepo / IdCodec) → Router 組み立て
 * - Middleware の適用 (bearer gate / HTTP / security headers / CORS)
 * - axum::serve() で起動, SIGINT/SIGTERM で graceful shutdown
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, handlers::health::health};
use crate::config::Config;
use crate::middleware;
use crate::repos::vehicle_repo::{InMemoryVehicleRepo, PgVehicleRepo, VehicleRepo};
use crate::services::{auth::TokenAuthenticator, id_codec::IdCodec};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,customer_service=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics via tracing; stderr may not be collected.
        tracing::error!(?info, "panic");

        // Development: fail fast. Production: default behavior, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

pub async fn run() -> Result<()> {
    // .env first, so RUST_LOG from it reaches the EnvFilter.
    dotenvy::dotenv().ok();
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting customer-service in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build process-level services and inject them into the shared application state.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let auth = Arc::new(TokenAuthenticator::from_settings(&config.jwt));
    tracing::debug!(jwt = ?config.jwt, "bearer token verification configured");

    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)
        .context("invalid SQIDS_* configuration")?;

    let vehicles: Arc<dyn VehicleRepo> = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(url)
                .await
                .context("failed to connect to DATABASE_URL")?;

            sqlx::migrate!()
                .run(&pool)
                .await
                .context("failed to run database migrations")?;

            Arc::new(PgVehicleRepo::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; vehicles are kept in memory");
            Arc::new(InMemoryVehicleRepo::default())
        }
    };

    Ok(AppState::new(auth, vehicles, id_codec))
}

/// The full HTTP application: routes behind the bearer gate, then the
/// transport-level layers. CORS is outermost so preflights never reach the gate.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let routes = Router::new()
        .route("/health", get(health))
        .nest("/api", api::routes());

    let router = middleware::bearer_auth::apply(routes, state.clone()).with_state(state);
    let router = middleware::http::apply(router);
    let router = middleware::security_headers::apply(router);

    middleware::cors::apply(router, config)
}
