//! Runtime settings.
//!
//! Resolution order, later wins:
//!
//! 1. built-in defaults
//! 2. `config.toml` (`$XDG_CONFIG_HOME/headlines/` or `~/.config/headlines/`,
//!    or the file given with `--config`)
//! 3. environment: `NEWSAPI_KEY`, `HEADLINES_BASE_URL`, `HEADLINES_LOG`
//! 4. command-line flags (see [`crate::cli`])
//!
//! ```toml
//! api_key = "0123456789abcdef"
//! base_url = "https://newsapi.org/v2"
//! default_category = "technology"
//! log_level = "debug"
//! request_timeout_secs = 20
//! data_dir = "/home/me/.local/share/headlines"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::category::Category;
use crate::source::DEFAULT_BASE_URL;

const APP_DIR: &str = "headlines";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// NewsAPI credential.  Required, but usually supplied via `NEWSAPI_KEY`.
    pub api_key: Option<String>,
    pub base_url: String,
    /// Where `prefs.json` and `logs/` live.
    pub data_dir: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `info` or `headlines=debug`.
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Category shown at startup.
    pub default_category: Category,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: None,
            log_level: "info".to_string(),
            request_timeout_secs: 30,
            default_category: Category::General,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default location when `None`.
    ///
    /// An explicitly named file must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (default_config_path(), false),
        };

        let mut settings = if path.exists() {
            Self::from_file(&path)?
        } else if required {
            return Err(anyhow!("config file {} does not exist", path.display()));
        } else {
            Self::default()
        };
        settings.apply_env_from(|k| std::env::var(k).ok());
        Ok(settings)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Overlay environment variables, looked up through `get`.
    pub fn apply_env_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(v) = get("NEWSAPI_KEY").filter(|v| !v.trim().is_empty()) {
            self.api_key = Some(v);
        }
        if let Some(v) = get("HEADLINES_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = get("HEADLINES_LOG") {
            self.log_level = v;
        }
    }

    /// The API key, or an error telling the user how to provide one.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                anyhow!("no NewsAPI key configured; set NEWSAPI_KEY or api_key in config.toml")
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Configured data directory, or the XDG default.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            xdg_dir("XDG_DATA_HOME", &[".local", "share"]).join(APP_DIR)
        })
    }

    pub fn prefs_path(&self) -> PathBuf {
        self.data_dir().join("prefs.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }
}

/// `$XDG_CONFIG_HOME/headlines/config.toml`, falling back to `~/.config`.
pub fn default_config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
        .join(APP_DIR)
        .join("config.toml")
}

/// `$var` if set and non-empty, else `$HOME/<fallback...>`, else the
/// current directory.
fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    if let Some(dir) = std::env::var_os(var).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    match std::env::var_os("HOME") {
        Some(home) => fallback
            .iter()
            .fold(PathBuf::from(home), |acc, part| acc.join(part)),
        None => PathBuf::from("."),
    }
}
