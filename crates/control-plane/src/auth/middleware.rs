// Authentication extractors
// Decision: The auth gate is an extractor; a handler is protected by taking AuthUser
// Decision: Token is read from the Authorization header only ("Bearer <token>", bare token tolerated)

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::{config::AuthConfig, jwt::JwtService};
use crate::storage::StorageBackend;

pub const NO_TOKEN_MESSAGE: &str = "Access denied. No token provided.";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token.";

/// Authentication error
#[derive(Debug, Clone, Serialize)]
pub struct AuthError {
    pub message: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl AuthError {
    pub fn unauthorized(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: StatusCode::NOT_FOUND,
        }
    }

    pub fn internal(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Authenticated caller identity extracted from the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    /// User ID (token subject)
    pub id: Uuid,
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub jwt_service: Arc<JwtService>,
    pub db: Arc<StorageBackend>,
}

impl AuthState {
    pub fn new(config: AuthConfig, db: Arc<StorageBackend>) -> Self {
        let jwt_service = Arc::new(JwtService::new(config.jwt));
        Self { jwt_service, db }
    }
}

/// Extractor for authenticated user
/// This is required - returns 401 if not authenticated
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let user = authenticate(&parts.headers, &auth_state.jwt_service)?;
        parts.extensions.insert(user);
        Ok(user)
    }
}

/// Bearer token from the Authorization header, if any
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}

/// Check the request headers and resolve the caller
pub fn authenticate(headers: &HeaderMap, jwt_service: &JwtService) -> Result<AuthUser, AuthError> {
    let token = bearer_token(headers).ok_or_else(|| AuthError::unauthorized(NO_TOKEN_MESSAGE))?;

    let claims = jwt_service.validate_access_token(token).map_err(|e| {
        tracing::debug!("JWT validation failed: {}", e);
        AuthError::unauthorized(INVALID_TOKEN_MESSAGE)
    })?;

    let id = claims
        .user_id()
        .ok_or_else(|| AuthError::unauthorized(INVALID_TOKEN_MESSAGE))?;

    Ok(AuthUser { id })
}
