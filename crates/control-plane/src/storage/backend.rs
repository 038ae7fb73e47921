// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use anyhow::Result;
use holdyard_core::{Container, Pagination, StatusFilter};
use std::sync::Arc;
use uuid::Uuid;

use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend from a database URL
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    /// Short label for health output and startup logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory(_) => "memory",
        }
    }

    /// Run schema migrations; a no-op in dev mode
    pub async fn migrate(&self) -> Result<()> {
        match self {
            Self::Postgres(db) => db.migrate().await,
            Self::InMemory(_) => Ok(()),
        }
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        match self {
            Self::Postgres(db) => db.create_user(input).await,
            Self::InMemory(db) => db.create_user(input).await,
        }
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_user_by_username(username).await,
            Self::InMemory(db) => db.get_user_by_username(username).await,
        }
    }

    pub async fn get_users(&self, ids: &[Uuid]) -> Result<Vec<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_users(ids).await,
            Self::InMemory(db) => db.get_users(ids).await,
        }
    }

    // ============================================
    // Containers
    // ============================================

    pub async fn find_container_by_number(
        &self,
        container_number: &str,
    ) -> Result<Option<Container>> {
        match self {
            Self::Postgres(db) => db.find_container_by_number(container_number).await,
            Self::InMemory(db) => db.find_container_by_number(container_number).await,
        }
    }

    pub async fn get_container(&self, id: Uuid) -> Result<Option<Container>> {
        match self {
            Self::Postgres(db) => db.get_container(id).await,
            Self::InMemory(db) => db.get_container(id).await,
        }
    }

    pub async fn save_container(&self, container: &Container) -> Result<Container> {
        match self {
            Self::Postgres(db) => db.save_container(container).await,
            Self::InMemory(db) => db.save_container(container).await,
        }
    }

    pub async fn delete_container(&self, id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_container(id).await,
            Self::InMemory(db) => db.delete_container(id).await,
        }
    }

    pub async fn list_containers(
        &self,
        filter: StatusFilter,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Container>> {
        match self {
            Self::Postgres(db) => db.list_containers(filter, pagination).await,
            Self::InMemory(db) => db.list_containers(filter, pagination).await,
        }
    }

    pub async fn count_containers(&self, filter: StatusFilter) -> Result<u64> {
        match self {
            Self::Postgres(db) => db.count_containers(filter).await,
            Self::InMemory(db) => db.count_containers(filter).await,
        }
    }
}
