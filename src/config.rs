use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "Patient Analytics";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_BIND: &str = "PATIENT_ANALYTICS_BIND";
pub const ENV_JWT_SECRET: &str = "PATIENT_ANALYTICS_JWT_SECRET";
pub const ENV_TOKEN_LEEWAY: &str = "PATIENT_ANALYTICS_TOKEN_LEEWAY_SECS";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8083";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,patient_analytics=debug,tower=warn,hyper=warn"
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Runtime configuration for the HTTP service.
#[derive(Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    /// HS256 shared secret used to verify bearer tokens.
    pub jwt_secret: Vec<u8>,
    /// Clock skew tolerated when checking `exp`.
    pub token_leeway_secs: u64,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("token_leeway_secs", &self.token_leeway_secs)
            .finish()
    }
}

impl ServiceConfig {
    /// Load from process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            var: ENV_BIND,
            reason: format!("{e}"),
        })?;

        let secret = lookup(ENV_JWT_SECRET).ok_or(ConfigError::Missing(ENV_JWT_SECRET))?;
        if secret.trim().is_empty() {
            return Err(ConfigError::Empty(ENV_JWT_SECRET));
        }

        let token_leeway_secs = match lookup(ENV_TOKEN_LEEWAY) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: ENV_TOKEN_LEEWAY,
                reason: format!("{e}"),
            })?,
            None => 0,
        };

        Ok(Self {
            bind_addr,
            jwt_secret: secret.into_bytes(),
            token_leeway_secs,
        })
    }
}
