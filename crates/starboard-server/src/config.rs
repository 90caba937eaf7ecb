use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use starboard_api::AuthConfig;
use tracing::warn;

/// Placeholder JWT secrets that must not reach production.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

const DEV_SECRET: &str = "dev-secret-change-me";

pub struct ServerConfig {
    pub db_path: PathBuf,
    pub addr: SocketAddr,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let db_path: PathBuf = env_or("STARBOARD_DB_PATH", "starboard.db").into();
        let host = env_or("STARBOARD_HOST", "0.0.0.0");
        let port: u16 = env_or("STARBOARD_PORT", "8080")
            .parse()
            .context("STARBOARD_PORT must be a port number")?;
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .context("invalid STARBOARD_HOST")?;

        let secret = env_or("STARBOARD_JWT_SECRET", DEV_SECRET);
        let auth_disabled = std::env::var("STARBOARD_AUTH_DISABLED")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let ttl_hours: u64 = env_or("STARBOARD_TOKEN_TTL_HOURS", "24")
            .parse()
            .context("STARBOARD_TOKEN_TTL_HOURS must be a whole number of hours")?;

        if auth_disabled {
            warn!("Authentication is DISABLED; every protected route is open");
        } else if PLACEHOLDER_SECRETS.contains(&secret.as_str()) {
            warn!("STARBOARD_JWT_SECRET is unset or still a placeholder; set it before deploying");
        }

        let auth = AuthConfig::new(secret)
            .with_enabled(!auth_disabled)
            .with_token_ttl(Duration::from_secs(ttl_hours * 3600));

        Ok(Self { db_path, addr, auth })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}
