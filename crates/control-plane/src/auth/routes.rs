// Authentication HTTP routes
// Decision: Keep the /auth/login path and {token} response shape for existing clients
// Decision: Unknown users get 404 and bad passwords 401, as existing clients distinguish them

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    config::AdminConfig,
    middleware::{AuthError, AuthState},
};
use crate::storage::{
    models::CreateUserRow,
    password::{hash_password, verify_password},
    StorageBackend,
};

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "yard1")]
    pub username: String,
    pub password: String,
}

/// Token response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed access token, valid for the configured lifetime (8 hours by default)
    pub token: String,
}

/// Create auth routes
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .with_state(state)
}

/// POST /auth/login - Login with username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AuthState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let user = state
        .db
        .get_user_by_username(&req.username)
        .await
        .map_err(|e| {
            tracing::error!("Database error during login: {}", e);
            AuthError::internal("Server error")
        })?
        .ok_or_else(|| AuthError::not_found("User not found"))?;

    let valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {}", e);
        AuthError::internal("Server error")
    })?;

    if !valid {
        tracing::debug!(username = %user.username, "Rejected login");
        return Err(AuthError::unauthorized("Invalid credentials"));
    }

    let token = state
        .jwt_service
        .generate_access_token(user.id)
        .map_err(|e| {
            tracing::error!("Token generation error: {}", e);
            AuthError::internal("Server error")
        })?;

    tracing::info!(
        user_id = %user.id,
        expires_in_secs = state.jwt_service.token_lifetime_secs(),
        "User logged in"
    );
    Ok(Json(TokenResponse { token }))
}

/// Create the configured bootstrap user unless a user with that name exists
pub async fn ensure_admin_user(db: &StorageBackend, admin: &AdminConfig) -> anyhow::Result<()> {
    if db.get_user_by_username(&admin.username).await?.is_some() {
        tracing::debug!(username = %admin.username, "Bootstrap user already present");
        return Ok(());
    }

    let password_hash = hash_password(&admin.password)?;
    let user = db
        .create_user(CreateUserRow {
            username: admin.username.clone(),
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "Created bootstrap user");
    Ok(())
}
