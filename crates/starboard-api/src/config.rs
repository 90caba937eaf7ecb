use std::fmt;
use std::time::Duration;

pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Authentication settings, fixed at startup.
#[derive(Clone)]
pub struct AuthConfig {
    /// When false the auth gate lets every request through.
    pub enabled: bool,
    /// Shared HMAC secret for issuing and validating tokens.
    pub secret: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            enabled: true,
            secret: secret.into(),
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("enabled", &self.enabled)
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
