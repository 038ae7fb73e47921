// Repository layer for PostgreSQL
// Decision: Containers are documents; hold entries live in a JSONB column
// Decision: Natural order is (created_at, id); ids are UUID v7

use anyhow::Result;
use holdyard_core::{Container, Pagination, StatusFilter};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::*;

const CONTAINER_COLUMNS: &str = "id, container_number, hold_types, created_at, updated_at";

/// SQL predicate for a status filter. Fixed strings only, never user input.
fn status_predicate(filter: StatusFilter) -> &'static str {
    match filter {
        StatusFilter::Any => "TRUE",
        StatusFilter::Active => r#"hold_types @> '[{"status": true}]'::jsonb"#,
        StatusFilter::Inactive => {
            r#"jsonb_array_length(hold_types) > 0 AND NOT (hold_types @> '[{"status": true}]'::jsonb)"#
        }
    }
}

/// LIMIT and OFFSET for a page. Values past i64::MAX clamp and yield an empty page.
fn window(pagination: Pagination) -> (i64, i64) {
    let limit = i64::try_from(pagination.limit()).unwrap_or(i64::MAX);
    let offset = i64::try_from(pagination.offset()).unwrap_or(i64::MAX);
    (limit, offset)
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&input.username)
        .bind(&input.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_users(&self, ids: &[Uuid]) -> Result<Vec<UserRow>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, created_at, updated_at
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ============================================
    // Containers
    // ============================================

    pub async fn find_container_by_number(
        &self,
        container_number: &str,
    ) -> Result<Option<Container>> {
        let sql = format!(
            "SELECT {CONTAINER_COLUMNS} FROM containers \
             WHERE container_number = $1 \
             ORDER BY created_at, id \
             LIMIT 1"
        );
        let row = sqlx::query_as::<_, ContainerRow>(&sql)
            .bind(container_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Container::from))
    }

    pub async fn get_container(&self, id: Uuid) -> Result<Option<Container>> {
        let sql = format!("SELECT {CONTAINER_COLUMNS} FROM containers WHERE id = $1");
        let row = sqlx::query_as::<_, ContainerRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Container::from))
    }

    /// Insert or overwrite the whole container document
    pub async fn save_container(&self, container: &Container) -> Result<Container> {
        let sql = format!(
            "INSERT INTO containers ({CONTAINER_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO UPDATE SET \
                 hold_types = EXCLUDED.hold_types, \
                 updated_at = EXCLUDED.updated_at \
             RETURNING {CONTAINER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ContainerRow>(&sql)
            .bind(container.id)
            .bind(&container.container_number)
            .bind(Json(&container.hold_types))
            .bind(container.created_at)
            .bind(container.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    pub async fn delete_container(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM containers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_containers(
        &self,
        filter: StatusFilter,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Container>> {
        let predicate = status_predicate(filter);
        let rows = match pagination {
            Some(pagination) => {
                let (limit, offset) = window(pagination);
                let sql = format!(
                    "SELECT {CONTAINER_COLUMNS} FROM containers \
                     WHERE {predicate} \
                     ORDER BY created_at, id \
                     LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, ContainerRow>(&sql)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {CONTAINER_COLUMNS} FROM containers \
                     WHERE {predicate} \
                     ORDER BY created_at, id"
                );
                sqlx::query_as::<_, ContainerRow>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(Container::from).collect())
    }

    pub async fn count_containers(&self, filter: StatusFilter) -> Result<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM containers WHERE {}",
            status_predicate(filter)
        );
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(u64::try_from(count)?)
    }
}
