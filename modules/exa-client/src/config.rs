use std::time::Duration;

use crate::error::{ExaError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.exa.ai";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Keys this short or shorter are never shown, not even a prefix.
const PREVIEW_MIN_CHARS: usize = 8;
const PREVIEW_PREFIX_CHARS: usize = 5;

/// Connection settings for the Exa API.
#[derive(Clone)]
pub struct ExaConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ExaConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load from `EXA_API_KEY`, `EXA_BASE_URL` and `EXA_TIMEOUT_SECS`,
    /// reading a `.env` file first if one is present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|name| std::env::var(name).ok())?;
        config.log_keys();
        Ok(config)
    }

    /// Build from an arbitrary variable source, with the same rules as `from_env`.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = get("EXA_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ExaError::Config("EXA_API_KEY is not set".to_string()))?;

        let mut config = Self::new(api_key.trim());
        if let Some(base_url) = get("EXA_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config = config.with_base_url(base_url.trim());
        }
        if let Some(secs) = get("EXA_TIMEOUT_SECS") {
            let parsed: u64 = secs.trim().parse().map_err(|_| {
                ExaError::Config(format!("EXA_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            config = config.with_timeout(Duration::from_secs(parsed));
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn log_keys(&self) {
        tracing::info!("Exa config loaded:");
        tracing::info!("  EXA_API_KEY: {}", preview(&self.api_key));
        tracing::info!("  EXA_BASE_URL: {}", self.base_url);
        tracing::info!("  EXA_TIMEOUT_SECS: {}", self.timeout.as_secs());
    }
}

fn preview(val: &str) -> String {
    let chars = val.chars().count();
    if chars <= PREVIEW_MIN_CHARS {
        return format!("***({chars} chars)");
    }
    let prefix: String = val.chars().take(PREVIEW_PREFIX_CHARS).collect();
    format!("{prefix}...({chars} chars)")
}

impl std::fmt::Debug for ExaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExaConfig")
            .field("api_key", &preview(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
