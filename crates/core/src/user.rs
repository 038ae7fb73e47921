// User display types
//
// Users are owned by the credential store; containers only reference them by id.
// UserSummary is the password-free view served when those references are resolved.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Public view of a user, never carrying credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserSummary {
    /// Unique identifier for the user.
    pub id: Uuid,
    /// Login name of the user.
    #[cfg_attr(feature = "openapi", schema(example = "yard1"))]
    pub username: String,
}
