// Holdyard API server
// Decision: DATABASE_URL selects PostgreSQL; without it the server runs on in-memory storage
// Decision: CORS is permissive unless CORS_ALLOWED_ORIGINS lists origins

use anyhow::{Context, Result};
use axum::http::{header, Method};
use holdyard_control_plane::{
    auth::{ensure_admin_user, AuthConfig},
    build_router,
    config::ServerConfig,
    storage::StorageBackend,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    // RUST_LOG overrides the default filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "holdyard_control_plane=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "holdyard-api starting...");

    let server_config = ServerConfig::from_env();

    // Initialize storage
    let db = match &server_config.database_url {
        Some(url) => {
            let db = StorageBackend::postgres(url)
                .await
                .context("Failed to connect to database")?;
            db.migrate().await.context("Failed to run migrations")?;
            tracing::info!("Connected to database");
            db
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on restart)");
            StorageBackend::in_memory()
        }
    };
    tracing::info!(storage = db.kind(), dev_mode = db.is_dev_mode(), "Storage ready");
    let db = Arc::new(db);

    // Load authentication configuration
    let auth_config = AuthConfig::from_env();
    tracing::info!(
        token_lifetime_secs = auth_config.jwt.token_lifetime.as_secs(),
        bootstrap_user = auth_config.admin.is_some(),
        "Authentication configured"
    );

    if let Some(admin) = &auth_config.admin {
        ensure_admin_user(&db, admin)
            .await
            .context("Failed to create bootstrap user")?;
    }

    if !server_config.api_prefix.is_empty() {
        tracing::info!(prefix = %server_config.api_prefix, "API prefix configured");
    }

    let app = build_router(db, auth_config, &server_config.api_prefix);

    let cors = if server_config.cors_origins.is_empty() {
        tracing::info!("CORS permissive (no CORS_ALLOWED_ORIGINS)");
        CorsLayer::permissive()
    } else {
        tracing::info!(origins = ?server_config.cors_origins, "CORS origins configured");
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(server_config.cors_origins.clone()))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
    };

    let app = app.layer(cors).layer(TraceLayer::new_for_http());

    // Start HTTP server
    let addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
