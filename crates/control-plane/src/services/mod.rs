// Services layer for business logic
// Services own business logic and validation, calling storage directly

pub mod container;

pub use container::{ContainerListing, ContainerService};
