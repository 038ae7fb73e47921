// Authentication module
// Decision: Username/password login issuing short-lived bearer JWTs
// Decision: Token service is constructed once and injected via AuthState

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod routes;

pub use config::AuthConfig;
pub use middleware::{AuthState, AuthUser};
pub use routes::{ensure_admin_user, routes};
