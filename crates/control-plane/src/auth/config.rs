// Authentication configuration loaded from environment variables.
// Decision: Accept JWT_SECRET (legacy deployments) and AUTH_JWT_SECRET
// Decision: Without a secret, generate a per-process one so dev mode still works

use std::time::Duration;

/// Default token lifetime: 8 hours
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(8 * 60 * 60);

/// Longest accepted token lifetime: 365 days
pub const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Bootstrap user created at startup if missing (dev / first deploy)
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWTs
    pub secret: String,
    /// Token lifetime
    pub token_lifetime: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_lifetime: DEFAULT_TOKEN_LIFETIME,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Bootstrap user
    pub admin: Option<AdminConfig>,
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .or_else(|_| std::env::var("AUTH_JWT_SECRET"))
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                tracing::warn!(
                    "JWT_SECRET not set, using a random secret; tokens will not survive a restart"
                );
                generate_secret()
            });

        let token_lifetime = parse_token_lifetime(std::env::var("AUTH_TOKEN_LIFETIME").ok());

        let admin = match (
            std::env::var("ADMIN_USERNAME"),
            std::env::var("ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
                Some(AdminConfig { username, password })
            }
            _ => None,
        };

        Self {
            jwt: JwtConfig {
                secret,
                token_lifetime,
            },
            admin,
        }
    }

    /// Config with a fixed secret (tests, tooling)
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt: JwtConfig {
                secret: secret.into(),
                ..JwtConfig::default()
            },
            admin: None,
        }
    }
}

/// Token lifetime from a seconds value. Unparseable values fall back to the default,
/// values above MAX_TOKEN_LIFETIME are clamped.
fn parse_token_lifetime(value: Option<String>) -> Duration {
    let Some(lifetime) = value
        .and_then(|s| s.trim().parse().ok())
        .map(Duration::from_secs)
    else {
        return DEFAULT_TOKEN_LIFETIME;
    };

    if lifetime > MAX_TOKEN_LIFETIME {
        tracing::warn!(
            requested_secs = lifetime.as_secs(),
            max_secs = MAX_TOKEN_LIFETIME.as_secs(),
            "AUTH_TOKEN_LIFETIME too large, clamping"
        );
        return MAX_TOKEN_LIFETIME;
    }
    lifetime
}

/// Random 256-bit secret, hex encoded
fn generate_secret() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}
