/// Runtime configuration read from the environment
///
/// - `TRYON_BACKEND_URL`: backend origin (default `http://localhost:8001`)
/// - `TRYON_SHARE_URL`: link copied by the share fallback (default `<origin>/tryon`)
/// - `TRYON_CONNECT_TIMEOUT_SECS`: HTTP connect timeout (default 10)

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend origin without trailing slash
    pub backend_url: String,
    pub share_url: String,
    pub connect_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            share_url: format!("{}/tryon", DEFAULT_BACKEND_URL),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = match lookup("TRYON_BACKEND_URL") {
            Some(raw) => normalize_origin(&raw)?,
            None => DEFAULT_BACKEND_URL.to_string(),
        };

        let share_url = lookup("TRYON_SHARE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("{}/tryon", backend_url));

        let connect_timeout = match lookup("TRYON_CONNECT_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
                if secs == 0 {
                    return Err(ConfigError::InvalidTimeout(raw));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { backend_url, share_url, connect_timeout })
    }

    /// Base path of the try-on API
    pub fn api_base(&self) -> String {
        format!("{}/api", self.backend_url)
    }
}

fn normalize_origin(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBackendUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}
