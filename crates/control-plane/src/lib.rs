// Holdyard Control Plane Library
// Decision: Shared library for binaries (API server, OpenAPI export) and router-level tests

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Authentication module
pub mod auth;

// Server configuration
pub mod config;

// Services layer
pub mod services;
pub use services::ContainerService;

// Storage layer
pub mod storage;

// OpenAPI spec generation
pub mod openapi;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{AuthConfig, AuthState};
use crate::storage::StorageBackend;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage: &'static str,
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    storage: &'static str,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage,
    })
}

/// Build the application router: health and Swagger UI at the root, API routes under `api_prefix`
pub fn build_router(db: Arc<StorageBackend>, auth_config: AuthConfig, api_prefix: &str) -> Router {
    let health_state = HealthState {
        storage: db.kind(),
    };

    let auth_state = AuthState::new(auth_config, db);
    let containers_state = api::containers::AppState::new(auth_state.clone());

    let api_routes = Router::new()
        .merge(api::containers::routes(containers_state))
        .merge(auth::routes(auth_state));

    Router::new()
        .route("/health", get(health).with_state(health_state))
        .merge(build_router_with_prefix(api_routes, api_prefix))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", openapi::ApiDoc::openapi()),
        )
}

/// Build router with optional API prefix (extracted for testing)
pub fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_routes() -> Router {
        Router::new().route("/test", get(|| async { "ok" }))
    }

    #[tokio::test]
    async fn test_api_prefix_empty() {
        let app = build_router_with_prefix(test_routes(), "");

        let response = app
            .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_api_prefix_set() {
        let app = build_router_with_prefix(test_routes(), "/api");

        // Route should work with prefix
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);

        // Route should NOT work without prefix
        let response = app
            .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_health_reports_storage() {
        let app = build_router(
            Arc::new(StorageBackend::in_memory()),
            AuthConfig::with_secret("test-secret"),
            "/api",
        );

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["storage"], "memory");
    }
}
