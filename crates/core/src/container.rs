// Container domain types
//
// A container owns an ordered list of hold-type entries. Entries are never
// removed or relabelled; disabling a hold flips its status and records who did it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::user::UserSummary;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A single hold flag on a container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HoldTypeEntry {
    /// Hold label, e.g. "CUSTOMS".
    #[serde(rename = "type")]
    #[cfg_attr(feature = "openapi", schema(example = "CUSTOMS"))]
    pub hold_type: String,
    /// `true` while the hold is active, `false` once disabled.
    pub status: bool,
    /// When the entry was created.
    pub date_added: DateTime<Utc>,
    /// User who created the entry.
    pub added_by: Uuid,
    /// User who disabled the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Uuid>,
    /// When the entry was disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<DateTime<Utc>>,
}

impl HoldTypeEntry {
    /// New active entry attributed to `added_by`.
    pub fn active(hold_type: impl Into<String>, added_by: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            hold_type: hold_type.into(),
            status: true,
            date_added: now,
            added_by,
            updated_by: None,
            date_updated: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status
    }
}

/// Container document with its embedded hold history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Unique identifier for the container document.
    pub id: Uuid,
    /// Business container number. Not unique at the data layer.
    #[cfg_attr(feature = "openapi", schema(example = "MSCU1234567"))]
    pub container_number: String,
    /// Hold entries in the order they were added.
    #[serde(default)]
    pub hold_types: Vec<HoldTypeEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Container {
    /// Empty container with a fresh time-ordered id.
    pub fn new(container_number: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            container_number: container_number.into(),
            hold_types: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Index of the active entry for `hold_type`, if any.
    pub fn active_hold_index(&self, hold_type: &str) -> Option<usize> {
        self.hold_types
            .iter()
            .position(|h| h.hold_type == hold_type && h.is_active())
    }

    pub fn has_active_hold(&self) -> bool {
        self.hold_types.iter().any(HoldTypeEntry::is_active)
    }

    /// Ids of every user referenced by the hold history, without duplicates.
    pub fn referenced_users(&self) -> HashSet<Uuid> {
        self.hold_types
            .iter()
            .flat_map(|entry| std::iter::once(entry.added_by).chain(entry.updated_by))
            .collect()
    }

    /// Resolve user references against `users`. Unknown ids become `None`.
    pub fn into_view(self, users: &HashMap<Uuid, UserSummary>) -> ContainerView {
        let hold_types = self
            .hold_types
            .into_iter()
            .map(|h| HoldTypeEntryView {
                hold_type: h.hold_type,
                status: h.status,
                date_added: h.date_added,
                added_by: users.get(&h.added_by).cloned(),
                updated_by: h.updated_by.and_then(|id| users.get(&id).cloned()),
                date_updated: h.date_updated,
            })
            .collect();

        ContainerView {
            id: self.id,
            container_number: self.container_number,
            hold_types,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Hold entry with user references resolved for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HoldTypeEntryView {
    #[serde(rename = "type")]
    pub hold_type: String,
    pub status: bool,
    pub date_added: DateTime<Utc>,
    /// Creator, or null when the user no longer exists.
    pub added_by: Option<UserSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<UserSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<DateTime<Utc>>,
}

/// Container as returned by list queries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ContainerView {
    pub id: Uuid,
    pub container_number: String,
    pub hold_types: Vec<HoldTypeEntryView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
