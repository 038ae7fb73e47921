// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use holdyard_core::{Container, HoldTypeEntry, UserSummary};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Users
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateUserRow {
    pub username: String,
    pub password_hash: String,
}

// ============================================
// Containers
// ============================================

/// Container document; hold entries are stored as a JSONB array
#[derive(Debug, Clone, FromRow)]
pub struct ContainerRow {
    pub id: Uuid,
    pub container_number: String,
    pub hold_types: Json<Vec<HoldTypeEntry>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContainerRow> for Container {
    fn from(row: ContainerRow) -> Self {
        Container {
            id: row.id,
            container_number: row.container_number,
            hold_types: row.hold_types.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
