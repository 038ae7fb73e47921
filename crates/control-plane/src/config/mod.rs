// Server configuration loaded from environment variables
// Decision: Loading never fails; unusable values fall back to defaults
// Decision: No DATABASE_URL means dev mode with in-memory storage

use axum::http::HeaderValue;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen port, bound on 0.0.0.0
    pub port: u16,
    /// PostgreSQL URL; None selects the in-memory backend
    pub database_url: Option<String>,
    /// Allowed CORS origins; empty means permissive CORS
    pub cors_origins: Vec<HeaderValue>,
    /// Prefix nested in front of all API routes, e.g. "/api"
    pub api_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            cors_origins: Vec::new(),
            api_prefix: String::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let port = non_empty("PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
        let cors_origins = non_empty("CORS_ALLOWED_ORIGINS")
            .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
            .unwrap_or_default();

        Self {
            port,
            database_url: non_empty("DATABASE_URL"),
            cors_origins,
            api_prefix: non_empty("API_PREFIX").unwrap_or_default(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
