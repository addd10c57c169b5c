use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::{
    DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_THRESHOLD, DEFAULT_USER_ID,
    RESIZE_DEBOUNCE_MS,
};
use crate::error::{EvalError, Result};
use crate::loader::RenderPolicy;
use crate::model::Threshold;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "imgeval.toml";

pub const ENV_API_URL: &str = "IMGEVAL_API_URL";
pub const ENV_USER_ID: &str = "IMGEVAL_USER_ID";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub user_id: String,
    pub default_threshold: u8,
    pub request_timeout_secs: u64,
    pub render_policy: RenderPolicy,
    pub resize_debounce_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            default_threshold: DEFAULT_THRESHOLD,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            render_policy: RenderPolicy::default(),
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| EvalError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| EvalError::Config(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Apply `IMGEVAL_API_URL` / `IMGEVAL_USER_ID` as returned by `lookup`.
    /// Empty values are ignored.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            debug!(api_url = %url, "api_url overridden from environment");
            self.api_url = url;
        }
        if let Some(user) = lookup(ENV_USER_ID).filter(|v| !v.trim().is_empty()) {
            debug!(user_id = %user, "user_id overridden from environment");
            self.user_id = user;
        }
        self
    }

    /// Defaults, then `path` (or `imgeval.toml` if present), then the process
    /// environment. An explicit `path` must exist; the implicit file may not.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(p) => Self::load(p)?,
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    match Self::load(implicit) {
                        Ok(config) => config,
                        Err(e) => {
                            warn!("Ignoring {DEFAULT_CONFIG_FILE}: {e}");
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
        };
        Ok(base.with_env_overrides(|key| std::env::var(key).ok()))
    }

    pub fn threshold(&self) -> Threshold {
        Threshold::new(self.default_threshold)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}
