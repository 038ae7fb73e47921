// Container service for hold-type business logic
// Decision: Transitions are pure (holdyard_core::holds); this service loads, applies and persists
// Decision: No locking around load/apply/save; concurrent writers on one container can race

use crate::storage::StorageBackend;
use chrono::Utc;
use holdyard_core::{
    apply_add, apply_disable, Container, ContainerView, HoldError, Page, Pagination, Result,
    StatusFilter, UserSummary,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Result of a container listing: the full list, or one page of it
#[derive(Debug, Clone)]
pub enum ContainerListing {
    All(Vec<ContainerView>),
    Paged(Page<ContainerView>),
}

pub struct ContainerService {
    db: Arc<StorageBackend>,
}

impl ContainerService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    /// Add an active hold to the container with this number, creating it if needed
    pub async fn add_hold(
        &self,
        container_number: &str,
        hold_type: &str,
        actor: Uuid,
    ) -> Result<Container> {
        let span = tracing::info_span!(
            "container.add_hold",
            container_number = %container_number,
            hold_type = %hold_type,
            user_id = %actor,
            container_id = tracing::field::Empty,
        );

        self.add_hold_inner(container_number, hold_type, actor)
            .instrument(span)
            .await
    }

    async fn add_hold_inner(
        &self,
        container_number: &str,
        hold_type: &str,
        actor: Uuid,
    ) -> Result<Container> {
        let existing = self.db.find_container_by_number(container_number).await?;
        let created = existing.is_none();

        let container = apply_add(existing, container_number, hold_type, actor, Utc::now())?;
        let container = self.db.save_container(&container).await?;

        tracing::Span::current().record("container_id", container.id.to_string().as_str());
        tracing::info!(created, "hold type added");
        Ok(container)
    }

    /// Disable the active hold of this type on the container with this id
    pub async fn disable_hold(&self, id: &str, hold_type: &str, actor: Uuid) -> Result<Container> {
        let span = tracing::info_span!(
            "container.disable_hold",
            container_id = %id,
            hold_type = %hold_type,
            user_id = %actor,
        );

        self.disable_hold_inner(id, hold_type, actor)
            .instrument(span)
            .await
    }

    async fn disable_hold_inner(&self, id: &str, hold_type: &str, actor: Uuid) -> Result<Container> {
        let container = self.load(id).await?;
        let container = apply_disable(container, hold_type, actor, Utc::now())?;
        let container = self.db.save_container(&container).await?;

        tracing::info!(container_number = %container.container_number, "hold type disabled");
        Ok(container)
    }

    /// List containers matching `filter`, optionally one page at a time
    pub async fn list(
        &self,
        filter: StatusFilter,
        pagination: Option<Pagination>,
    ) -> Result<ContainerListing> {
        let containers = self.db.list_containers(filter, pagination).await?;
        let users = self.resolve_users(&containers).await?;
        let views: Vec<ContainerView> = containers
            .into_iter()
            .map(|c| c.into_view(&users))
            .collect();

        match pagination {
            Some(pagination) => {
                let total = self.db.count_containers(filter).await?;
                Ok(ContainerListing::Paged(Page::new(views, total, pagination)))
            }
            None => Ok(ContainerListing::All(views)),
        }
    }

    /// Delete a container by id. Returns whether a container was removed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let Ok(uuid) = Uuid::parse_str(id) else {
            tracing::debug!(container_id = %id, "delete with unparseable id, nothing removed");
            return Ok(false);
        };

        let removed = self.db.delete_container(uuid).await?;
        if removed {
            tracing::info!(container_id = %uuid, "container deleted");
        } else {
            tracing::debug!(container_id = %uuid, "delete matched no container");
        }
        Ok(removed)
    }

    async fn load(&self, id: &str) -> Result<Container> {
        let uuid = Uuid::parse_str(id).map_err(|_| HoldError::not_found(id))?;
        self.db
            .get_container(uuid)
            .await?
            .ok_or_else(|| HoldError::not_found(id))
    }

    async fn resolve_users(&self, containers: &[Container]) -> Result<HashMap<Uuid, UserSummary>> {
        let ids: HashSet<Uuid> = containers
            .iter()
            .flat_map(Container::referenced_users)
            .collect();
        let ids: Vec<Uuid> = ids.into_iter().collect();

        let rows = self.db.get_users(&ids).await?;
        Ok(rows.iter().map(|row| (row.id, row.summary())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CreateUserRow;

    async fn setup() -> (ContainerService, Uuid) {
        let db = Arc::new(StorageBackend::in_memory());
        let user = db
            .create_user(CreateUserRow {
                username: "yard1".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        (ContainerService::new(db), user.id)
    }

    #[tokio::test]
    async fn test_add_creates_container() {
        let (service, user) = setup().await;

        let container = service.add_hold("CONT1", "CUSTOMS", user).await.unwrap();
        assert_eq!(container.container_number, "CONT1");
        assert_eq!(container.hold_types.len(), 1);
        assert!(container.hold_types[0].status);
        assert_eq!(container.hold_types[0].added_by, user);
    }

    #[tokio::test]
    async fn test_add_duplicate_active_leaves_container_unchanged() {
        let (service, user) = setup().await;
        let first = service.add_hold("CONT1", "CUSTOMS", user).await.unwrap();

        let err = service.add_hold("CONT1", "CUSTOMS", user).await.unwrap_err();
        assert!(matches!(err, HoldError::DuplicateActiveHold(_)));

        let stored = service.db.get_container(first.id).await.unwrap().unwrap();
        assert_eq!(stored.hold_types.len(), 1);
    }

    #[tokio::test]
    async fn test_disable_then_add_again_appends() {
        let (service, user) = setup().await;
        let container = service.add_hold("CONT1", "CUSTOMS", user).await.unwrap();
        let id = container.id.to_string();

        let disabled = service.disable_hold(&id, "CUSTOMS", user).await.unwrap();
        assert!(!disabled.hold_types[0].status);
        assert_eq!(disabled.hold_types[0].updated_by, Some(user));

        let readded = service.add_hold("CONT1", "CUSTOMS", user).await.unwrap();
        assert_eq!(readded.id, container.id);
        assert_eq!(readded.hold_types.len(), 2);
        assert!(!readded.hold_types[0].status);
        assert!(readded.hold_types[1].status);
    }

    #[tokio::test]
    async fn test_disable_errors() {
        let (service, user) = setup().await;
        let container = service.add_hold("CONT1", "CUSTOMS", user).await.unwrap();

        let err = service
            .disable_hold(&container.id.to_string(), "LINE", user)
            .await
            .unwrap_err();
        assert!(matches!(err, HoldError::NoActiveHold(_)));

        let err = service
            .disable_hold(&Uuid::now_v7().to_string(), "CUSTOMS", user)
            .await
            .unwrap_err();
        assert!(matches!(err, HoldError::NotFound(_)));

        let err = service
            .disable_hold("not-a-uuid", "CUSTOMS", user)
            .await
            .unwrap_err();
        assert!(matches!(err, HoldError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_blank_hold_type_is_invalid() {
        let (service, user) = setup().await;
        let err = service.add_hold("CONT1", "  ", user).await.unwrap_err();
        assert!(matches!(err, HoldError::InvalidInput(_)));
        assert!(service.db.find_container_by_number("CONT1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_resolves_users_and_paginates() {
        let (service, user) = setup().await;
        for i in 0..3 {
            service
                .add_hold(&format!("CONT{i}"), "CUSTOMS", user)
                .await
                .unwrap();
        }

        let ContainerListing::All(all) = service.list(StatusFilter::Any, None).await.unwrap() else {
            panic!("expected unpaginated listing");
        };
        assert_eq!(all.len(), 3);
        let added_by = all[0].hold_types[0].added_by.as_ref().unwrap();
        assert_eq!(added_by.username, "yard1");

        let listing = service
            .list(
                StatusFilter::Active,
                Some(Pagination {
                    page: 2,
                    page_size: 2,
                }),
            )
            .await
            .unwrap();
        let ContainerListing::Paged(page) = listing else {
            panic!("expected paged listing");
        };
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].container_number, "CONT2");
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_unknown_user_resolves_to_none() {
        let (service, _) = setup().await;
        service.add_hold("CONT1", "CUSTOMS", Uuid::now_v7()).await.unwrap();

        let ContainerListing::All(all) = service.list(StatusFilter::Any, None).await.unwrap() else {
            panic!("expected unpaginated listing");
        };
        assert!(all[0].hold_types[0].added_by.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let (service, user) = setup().await;
        let container = service.add_hold("CONT1", "CUSTOMS", user).await.unwrap();
        let id = container.id.to_string();

        assert!(service.delete(&id).await.unwrap());
        assert!(!service.delete(&id).await.unwrap());
        assert!(!service.delete("garbage").await.unwrap());
    }
}
