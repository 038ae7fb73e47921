// Hold-type state machine
//
// Add and Disable are expressed as pure transitions over Container values.
// Callers load the container, apply the transition and persist the result;
// a failed transition leaves the input untouched.
//
// Invariant: after any successful transition a container has at most one
// active entry per hold type.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::container::{Container, HoldTypeEntry};
use crate::error::{HoldError, Result};

/// Reject missing or blank hold-type labels.
pub fn validate_hold_type(hold_type: &str) -> Result<&str> {
    if hold_type.trim().is_empty() {
        return Err(HoldError::invalid_input("Hold type is required"));
    }
    Ok(hold_type)
}

/// Add an active `hold_type` entry.
///
/// `existing` is the container found for `container_number`, if any. When it is
/// `None` a new container is created holding exactly one active entry. An
/// existing container gains a new active entry unless one is already active,
/// in which case `DuplicateActiveHold` is returned. Disabled entries of the same
/// type are kept as history; they are not reactivated.
pub fn apply_add(
    existing: Option<Container>,
    container_number: &str,
    hold_type: &str,
    acting_user: Uuid,
    now: DateTime<Utc>,
) -> Result<Container> {
    let hold_type = validate_hold_type(hold_type)?;

    let mut container = match existing {
        Some(container) => {
            if container.active_hold_index(hold_type).is_some() {
                return Err(HoldError::DuplicateActiveHold(hold_type.to_string()));
            }
            container
        }
        None => Container::new(container_number, now),
    };

    container
        .hold_types
        .push(HoldTypeEntry::active(hold_type, acting_user, now));
    container.updated_at = now;
    Ok(container)
}

/// Disable the active `hold_type` entry, recording `acting_user` and `now`.
pub fn apply_disable(
    mut container: Container,
    hold_type: &str,
    acting_user: Uuid,
    now: DateTime<Utc>,
) -> Result<Container> {
    let hold_type = validate_hold_type(hold_type)?;

    let index = container
        .active_hold_index(hold_type)
        .ok_or_else(|| HoldError::NoActiveHold(hold_type.to_string()))?;

    let entry = &mut container.hold_types[index];
    entry.status = false;
    entry.updated_by = Some(acting_user);
    entry.date_updated = Some(now);
    container.updated_at = now;
    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashMap;

    fn at_most_one_active_per_type(container: &Container) -> bool {
        let mut active: HashMap<&str, usize> = HashMap::new();
        for entry in container.hold_types.iter().filter(|h| h.status) {
            *active.entry(entry.hold_type.as_str()).or_default() += 1;
        }
        active.values().all(|count| *count <= 1)
    }

    #[test]
    fn test_add_on_missing_container_creates_one_active_entry() {
        let user = Uuid::now_v7();
        let now = Utc::now();

        let container = apply_add(None, "CONT1", "CUSTOMS", user, now).unwrap();

        assert_eq!(container.container_number, "CONT1");
        assert_eq!(container.hold_types.len(), 1);
        let entry = &container.hold_types[0];
        assert_eq!(entry.hold_type, "CUSTOMS");
        assert!(entry.status);
        assert_eq!(entry.added_by, user);
        assert_eq!(entry.date_added, now);
        assert!(entry.updated_by.is_none());
        assert_eq!(container.created_at, now);
    }

    #[test]
    fn test_add_appends_new_type() {
        let user = Uuid::now_v7();
        let now = Utc::now();
        let container = apply_add(None, "CONT1", "CUSTOMS", user, now).unwrap();
        let later = now + Duration::minutes(5);

        let container = apply_add(Some(container), "CONT1", "VGM", user, later).unwrap();

        assert_eq!(container.hold_types.len(), 2);
        assert_eq!(container.hold_types[1].hold_type, "VGM");
        assert_eq!(container.updated_at, later);
        assert_eq!(container.created_at, now);
        assert!(at_most_one_active_per_type(&container));
    }

    #[test]
    fn test_add_duplicate_active_is_rejected() {
        let user = Uuid::now_v7();
        let now = Utc::now();
        let container = apply_add(None, "CONT1", "CUSTOMS", user, now).unwrap();
        let before = container.clone();

        let err = apply_add(Some(container), "CONT1", "CUSTOMS", user, now).unwrap_err();

        assert!(matches!(err, HoldError::DuplicateActiveHold(ref t) if t == "CUSTOMS"));
        // The caller still holds `before`; nothing was persisted.
        assert_eq!(before.hold_types.len(), 1);
    }

    #[test]
    fn test_add_after_disable_keeps_history() {
        let adder = Uuid::now_v7();
        let disabler = Uuid::now_v7();
        let now = Utc::now();

        let container = apply_add(None, "CONT1", "CUSTOMS", adder, now).unwrap();
        let container = apply_disable(container, "CUSTOMS", disabler, now).unwrap();
        let container = apply_add(Some(container), "CONT1", "CUSTOMS", adder, now).unwrap();

        let customs: Vec<_> = container
            .hold_types
            .iter()
            .filter(|h| h.hold_type == "CUSTOMS")
            .collect();
        assert_eq!(customs.len(), 2);
        assert!(!customs[0].status);
        assert_eq!(customs[0].updated_by, Some(disabler));
        assert!(customs[1].status);
        assert!(customs[1].updated_by.is_none());
        assert!(at_most_one_active_per_type(&container));
    }

    #[test]
    fn test_disable_sets_audit_fields() {
        let adder = Uuid::now_v7();
        let disabler = Uuid::now_v7();
        let now = Utc::now();
        let later = now + Duration::hours(1);

        let container = apply_add(None, "CONT1", "CUSTOMS", adder, now).unwrap();
        let container = apply_disable(container, "CUSTOMS", disabler, later).unwrap();

        let entry = &container.hold_types[0];
        assert!(!entry.status);
        assert_eq!(entry.added_by, adder);
        assert_eq!(entry.updated_by, Some(disabler));
        assert_eq!(entry.date_updated, Some(later));
        assert_eq!(container.updated_at, later);
        assert!(!container.has_active_hold());
    }

    #[test]
    fn test_disable_without_active_entry() {
        let user = Uuid::now_v7();
        let now = Utc::now();
        let container = apply_add(None, "CONT1", "CUSTOMS", user, now).unwrap();

        let err = apply_disable(container.clone(), "VGM", user, now).unwrap_err();
        assert!(matches!(err, HoldError::NoActiveHold(_)));

        let container = apply_disable(container, "CUSTOMS", user, now).unwrap();
        let err = apply_disable(container, "CUSTOMS", user, now).unwrap_err();
        assert!(matches!(err, HoldError::NoActiveHold(_)));
    }

    #[test]
    fn test_blank_hold_type_is_invalid() {
        let user = Uuid::now_v7();
        let now = Utc::now();

        assert!(matches!(
            apply_add(None, "CONT1", "", user, now),
            Err(HoldError::InvalidInput(_))
        ));
        assert!(matches!(
            apply_add(None, "CONT1", "   ", user, now),
            Err(HoldError::InvalidInput(_))
        ));

        let container = apply_add(None, "CONT1", "CUSTOMS", user, now).unwrap();
        assert!(matches!(
            apply_disable(container, "", user, now),
            Err(HoldError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_invariant_holds_over_mixed_sequence() {
        let user = Uuid::now_v7();
        let now = Utc::now();
        let steps = [
            ("add", "CUSTOMS"),
            ("add", "VGM"),
            ("add", "CUSTOMS"),
            ("disable", "CUSTOMS"),
            ("add", "CUSTOMS"),
            ("disable", "VGM"),
            ("disable", "VGM"),
            ("add", "VGM"),
            ("add", "VGM"),
        ];

        let mut container = apply_add(None, "CONT1", "LINE", user, now).unwrap();
        for (op, hold_type) in steps {
            let result = match op {
                "add" => apply_add(Some(container.clone()), "CONT1", hold_type, user, now),
                _ => apply_disable(container.clone(), hold_type, user, now),
            };
            if let Ok(next) = result {
                container = next;
            }
            assert!(at_most_one_active_per_type(&container));
        }

        // LINE, CUSTOMS, VGM, CUSTOMS, VGM
        assert_eq!(container.hold_types.len(), 5);
    }
}
