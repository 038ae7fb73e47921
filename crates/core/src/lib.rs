// Container Hold Abstractions
//
// This crate provides the DB-agnostic domain of Holdyard: containers carrying
// an ordered list of hold-type entries, and the rules for adding and disabling
// holds on them.
//
// Key design decisions:
// - Hold transitions are pure functions over owned Container values; storage
//   and HTTP live in the control-plane crate
// - At most one active entry per hold type; history is kept by appending
// - Status filtering is a closed enum mapped to predicates by each backend
// - Error taxonomy (HoldError) is shared by services and the HTTP layer

// Domain entity types
pub mod container;
pub mod user;

pub mod error;
pub mod holds;
pub mod query;

// Re-exports for convenience
pub use container::{Container, ContainerView, HoldTypeEntry, HoldTypeEntryView};
pub use error::{HoldError, Result};
pub use holds::{apply_add, apply_disable, validate_hold_type};
pub use query::{Page, Pagination, StatusFilter};
pub use user::UserSummary;
