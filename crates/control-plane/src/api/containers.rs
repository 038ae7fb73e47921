// Container HTTP routes (hold-type management)
// Decision: All container routes share a single `:id` path segment. For add-holdtype it carries
// the container number, for disable-holdtype and delete the container id. Existing clients
// depend on these paths.
// Decision: Query values are read as raw strings and parsed leniently by holdyard_core::query

use crate::services::{ContainerListing, ContainerService};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{delete, get, put},
    Json, Router,
};
use holdyard_core::{Container, ContainerView, HoldError, Pagination, StatusFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::common::{ApiError, MessageResponse};
use crate::auth::middleware::{AuthState, AuthUser};
use axum::extract::FromRef;

pub const DELETED_MESSAGE: &str = "Container deleted successfully";
pub const HOLD_TYPE_REQUIRED: &str = "Hold type is required";

/// App state for container routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ContainerService>,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(auth: AuthState) -> Self {
        Self {
            service: Arc::new(ContainerService::new(auth.db.clone())),
            auth,
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Request body for add-holdtype and disable-holdtype
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoldTypeRequest {
    /// Hold-type label, e.g. "CUSTOMS". Required and non-blank.
    #[schema(example = "CUSTOMS")]
    pub hold_type: Option<String>,
}

impl HoldTypeRequest {
    fn hold_type(&self) -> Result<&str, HoldError> {
        self.hold_type
            .as_deref()
            .ok_or_else(|| HoldError::invalid_input(HOLD_TYPE_REQUIRED))
    }
}

/// Hold type from a request body. Missing, non-JSON or mistyped bodies count as a missing hold type.
fn hold_type_from(body: Result<Json<HoldTypeRequest>, JsonRejection>) -> Result<String, HoldError> {
    let Json(req) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unusable hold-type request body");
        HoldError::invalid_input(HOLD_TYPE_REQUIRED)
    })?;
    req.hold_type().map(str::to_string)
}

/// Query parameters for listing containers
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListContainersQuery {
    /// "true": containers with an active hold. "false": containers whose holds are all disabled.
    /// Any other value: no filter.
    pub status: Option<String>,
    /// 1-based page number. Pagination applies only when both page and pageSize are given.
    pub page: Option<String>,
    /// Page size, 10 when not a positive number.
    pub page_size: Option<String>,
}

/// One page of containers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedContainersResponse {
    pub containers: Vec<ContainerView>,
    /// Number of containers matching the filter across all pages
    pub total: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

/// List response: paged object when pagination was requested, plain array otherwise
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ListContainersResponse {
    Paged(PagedContainersResponse),
    All(Vec<ContainerView>),
}

impl From<ContainerListing> for ListContainersResponse {
    fn from(listing: ContainerListing) -> Self {
        match listing {
            ContainerListing::All(containers) => Self::All(containers),
            ContainerListing::Paged(page) => Self::Paged(PagedContainersResponse {
                containers: page.items,
                total: page.total,
                current_page: page.page,
                total_pages: page.total_pages,
            }),
        }
    }
}

/// Create container routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/containers", get(list_containers))
        .route("/containers/:id", delete(delete_container))
        .route("/containers/:id/add-holdtype", put(add_hold_type))
        .route("/containers/:id/disable-holdtype", put(disable_hold_type))
        .with_state(state)
}

/// GET /containers - List containers with resolved users
#[utoipa::path(
    get,
    path = "/containers",
    params(ListContainersQuery),
    responses(
        (status = 200, description = "Containers in insertion order", body = ListContainersResponse),
        (status = 401, description = "Missing or invalid token", body = super::common::ErrorResponse),
        (status = 500, description = "Internal server error", body = super::common::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "containers"
)]
pub async fn list_containers(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListContainersQuery>,
) -> Result<Json<ListContainersResponse>, ApiError> {
    let filter = StatusFilter::from_param(query.status.as_deref());
    let pagination = Pagination::from_params(query.page.as_deref(), query.page_size.as_deref());

    let listing = state.service.list(filter, pagination).await?;
    Ok(Json(listing.into()))
}

/// DELETE /containers/{id} - Delete a container by id
///
/// Succeeds whether or not a container matched.
#[utoipa::path(
    delete,
    path = "/containers/{id}",
    params(("id" = String, Path, description = "Container id")),
    responses(
        (status = 200, description = "Container deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = super::common::ErrorResponse),
        (status = 500, description = "Internal server error", body = super::common::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "containers"
)]
pub async fn delete_container(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.service.delete(&id).await?;
    Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
}

/// PUT /containers/{id}/add-holdtype - Add an active hold
///
/// The path segment is the container NUMBER. A container is created when none
/// has this number yet.
#[utoipa::path(
    put,
    path = "/containers/{id}/add-holdtype",
    params(("id" = String, Path, description = "Container number (not the container id)")),
    request_body = HoldTypeRequest,
    responses(
        (status = 200, description = "Updated container", body = Container),
        (status = 400, description = "Missing hold type, or an active hold of this type exists", body = super::common::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = super::common::ErrorResponse),
        (status = 500, description = "Internal server error", body = super::common::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "containers"
)]
pub async fn add_hold_type(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(container_number): Path<String>,
    body: Result<Json<HoldTypeRequest>, JsonRejection>,
) -> Result<Json<Container>, ApiError> {
    let hold_type = hold_type_from(body)?;
    let container = state
        .service
        .add_hold(&container_number, &hold_type, auth.id)
        .await?;
    Ok(Json(container))
}

/// PUT /containers/{id}/disable-holdtype - Disable the active hold of a type
///
/// The path segment is the container ID.
#[utoipa::path(
    put,
    path = "/containers/{id}/disable-holdtype",
    params(("id" = String, Path, description = "Container id")),
    request_body = HoldTypeRequest,
    responses(
        (status = 200, description = "Updated container", body = Container),
        (status = 400, description = "Missing hold type, or no active hold of this type", body = super::common::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = super::common::ErrorResponse),
        (status = 404, description = "Container not found", body = super::common::ErrorResponse),
        (status = 500, description = "Internal server error", body = super::common::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "containers"
)]
pub async fn disable_hold_type(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    body: Result<Json<HoldTypeRequest>, JsonRejection>,
) -> Result<Json<Container>, ApiError> {
    let hold_type = hold_type_from(body)?;
    let container = state.service.disable_hold(&id, &hold_type, auth.id).await?;
    Ok(Json(container))
}
