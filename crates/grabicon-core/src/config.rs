//! Configuration for favicon discovery runs.
//!
//! Settings are plain values with sensible defaults, optionally loaded from a
//! TOML file. Every key is optional in the file; missing keys fall back to the
//! defaults below.
//!
//! ## Example Configuration File
//!
//! ```toml
//! request_timeout_secs = 10
//! connect_timeout_secs = 5
//! max_redirects = 10
//! concurrency = 4
//! max_icon_bytes = 5242880
//! max_page_bytes = 2097152
//! user_agent = "grabicon/0.2.0"
//! ```
//!
//! ## Loading
//!
//! ```rust,no_run
//! use grabicon::GrabConfig;
//!
//! // Platform config dir (e.g. ~/.config/grabicon/config.toml) or defaults
//! let config = GrabConfig::load()?;
//! assert!(config.concurrency > 0);
//! # Ok::<(), grabicon::Error>(())
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default number of candidate fetches in flight.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Upper bound on [`GrabConfig::concurrency`].
pub const MAX_CONCURRENCY: usize = 64;

/// Default upper bound on a single icon body (5 MiB).
pub const DEFAULT_MAX_ICON_BYTES: u64 = 5 * 1024 * 1024;

/// Default upper bound on the root page body (2 MiB).
pub const DEFAULT_MAX_PAGE_BYTES: u64 = 2 * 1024 * 1024;

/// Settings that shape every request made during a discovery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabConfig {
    /// Total time allowed for a single request, in seconds.
    ///
    /// Applies to the root page and to every candidate, so a discovery run
    /// always terminates even against a host that never answers.
    pub request_timeout_secs: u64,

    /// Time allowed to establish a connection, in seconds.
    pub connect_timeout_secs: u64,

    /// Redirect hops followed per request before giving up.
    pub max_redirects: usize,

    /// Number of icon candidates fetched concurrently.
    ///
    /// `1` gives a strictly sequential pipeline. The result set is the same
    /// either way. Must be between 1 and [`MAX_CONCURRENCY`].
    pub concurrency: usize,

    /// Candidate bodies larger than this many bytes are skipped.
    pub max_icon_bytes: u64,

    /// Only this many bytes of the root page are read and scanned.
    pub max_page_bytes: u64,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
            max_redirects: 10,
            concurrency: DEFAULT_CONCURRENCY,
            max_icon_bytes: DEFAULT_MAX_ICON_BYTES,
            max_page_bytes: DEFAULT_MAX_PAGE_BYTES,
            user_agent: concat!("grabicon/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl GrabConfig {
    /// Load configuration from the platform config directory, or defaults when
    /// no file exists there.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, is not valid
    /// TOML, or holds values rejected by [`GrabConfig::validate`].
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Config`] if its contents are invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Location of the default configuration file, if the platform has a
    /// config directory.
    ///
    /// - Linux: `~/.config/grabicon/config.toml`
    /// - macOS: `~/Library/Application Support/dev.grabicon.grabicon/config.toml`
    /// - Windows: `%APPDATA%\grabicon\grabicon\config\config.toml`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "grabicon", "grabicon")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Reject settings that would make discovery hang or do nothing.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(Error::Config(
                "connect_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.concurrency == 0 {
            return Err(Error::Config("concurrency must be greater than zero".into()));
        }
        if self.concurrency > MAX_CONCURRENCY {
            return Err(Error::Config(format!(
                "concurrency must be at most {MAX_CONCURRENCY}, got {}",
                self.concurrency
            )));
        }
        if self.max_page_bytes == 0 {
            return Err(Error::Config("max_page_bytes must be greater than zero".into()));
        }
        Ok(())
    }

    /// Per-request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Connect timeout as a [`Duration`].
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
