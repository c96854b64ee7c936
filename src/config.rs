//! Client configuration.
//!
//! Configuration comes from defaults, then the environment, then explicit
//! overrides (CLI flags).

use std::path::PathBuf;

/// Environment variable holding the server root URL.
pub const ENV_URL: &str = "DOCUDASH_URL";

/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "DOCUDASH_TIMEOUT_SECS";

/// Environment variable holding the persisted session path.
pub const ENV_SESSION_FILE: &str = "DOCUDASH_SESSION_FILE";

/// Path prefix every endpoint lives under.
pub const API_PREFIX: &str = "/api";

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root URL of the DocuDash server (e.g., `http://localhost:8000`).
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Where the session is persisted between runs, if anywhere.
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            session_file: None,
        }
    }
}

impl ClientConfig {
    /// Create a config for the given server root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_url(&base_url.into()),
            ..Default::default()
        }
    }

    /// Build a config from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Unparseable timeouts are ignored and the default is kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_URL).filter(|u| !u.trim().is_empty()) {
            config.base_url = normalize_url(&url);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = secs,
                _ => log::warn!("Ignoring invalid {}={:?}", ENV_TIMEOUT_SECS, raw),
            }
        }

        if let Some(path) = lookup(ENV_SESSION_FILE).filter(|p| !p.trim().is_empty()) {
            config.session_file = Some(PathBuf::from(path));
        }

        config
    }

    /// Override the server root URL.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = normalize_url(base_url.as_ref());
        self
    }

    /// Override the session file path.
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Full URL for an API path such as `/groups`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url.trim_end_matches('/'), API_PREFIX, path)
    }
}

/// Normalize a URL by removing trailing slashes.
pub fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
