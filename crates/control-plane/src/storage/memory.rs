// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: Containers kept in a Vec so list order is insertion order
//
// This implementation mirrors the PostgreSQL repository API, allowing the
// control-plane to run without a database for development and tests.
// Locks cover single calls only; read-modify-write sequences are not atomic.

use anyhow::{anyhow, Result};
use chrono::Utc;
use holdyard_core::{Container, Pagination, StatusFilter};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::models::*;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    users: RwLock<HashMap<Uuid, UserRow>>,
    containers: RwLock<Vec<Container>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        let mut users = self.users.write();
        if users.values().any(|u| u.username == input.username) {
            return Err(anyhow!("username already exists: {}", input.username));
        }

        let now = Utc::now();
        let row = UserRow {
            id: Uuid::now_v7(),
            username: input.username,
            password_hash: input.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(row.id, row.clone());
        Ok(row)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    pub async fn get_users(&self, ids: &[Uuid]) -> Result<Vec<UserRow>> {
        let users = self.users.read();
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    // ============================================
    // Containers
    // ============================================

    pub async fn find_container_by_number(
        &self,
        container_number: &str,
    ) -> Result<Option<Container>> {
        Ok(self
            .containers
            .read()
            .iter()
            .find(|c| c.container_number == container_number)
            .cloned())
    }

    pub async fn get_container(&self, id: Uuid) -> Result<Option<Container>> {
        Ok(self.containers.read().iter().find(|c| c.id == id).cloned())
    }

    pub async fn save_container(&self, container: &Container) -> Result<Container> {
        let mut containers = self.containers.write();
        match containers.iter_mut().find(|c| c.id == container.id) {
            Some(existing) => *existing = container.clone(),
            None => containers.push(container.clone()),
        }
        Ok(container.clone())
    }

    pub async fn delete_container(&self, id: Uuid) -> Result<bool> {
        let mut containers = self.containers.write();
        let before = containers.len();
        containers.retain(|c| c.id != id);
        Ok(containers.len() < before)
    }

    pub async fn list_containers(
        &self,
        filter: StatusFilter,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Container>> {
        let matching: Vec<Container> = self
            .containers
            .read()
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();

        Ok(match pagination {
            Some(pagination) => pagination.slice(matching),
            None => matching,
        })
    }

    pub async fn count_containers(&self, filter: StatusFilter) -> Result<u64> {
        Ok(self
            .containers
            .read()
            .iter()
            .filter(|c| filter.matches(c))
            .count() as u64)
    }
}
