//! Error types and handling for grabicon operations.
//!
//! Only two kinds of failure ever escape a discovery run: the caller gave us
//! nothing to work with, or the root page could not be resolved. Everything
//! that goes wrong while fetching individual icon candidates is absorbed by the
//! pipeline and reported as a [`SkipReason`](crate::SkipReason) instead.
//!
//! ## Error Categories
//!
//! - **Usage Errors**: missing target URL, unparseable URL, invalid configuration
//! - **Network Errors**: transport, DNS and timeout failures on the root page
//! - **HTTP Errors**: the root page answered with a non-success status
//! - **I/O Errors**: configuration file access
//!
//! ## Recovery Hints
//!
//! ```rust
//! use grabicon::Error;
//!
//! fn describe(err: &Error) -> String {
//!     if err.is_recoverable() {
//!         format!("temporary failure ({}): {err}", err.category())
//!     } else {
//!         format!("permanent failure ({}): {err}", err.category())
//!     }
//! }
//!
//! let err = Error::InvalidArgument("no url".to_string());
//! assert!(describe(&err).starts_with("permanent failure (invalid_argument)"));
//! ```

use thiserror::Error;

/// The main error type for grabicon operations.
///
/// All fallible public functions return `Result<T, Error>`. The underlying
/// transport and I/O errors are preserved so callers can inspect the full
/// source chain.
#[derive(Error, Debug)]
pub enum Error {
    /// No target URL was supplied.
    ///
    /// Raised by [`FaviconGrabber::grab`](crate::FaviconGrabber::grab) when it is
    /// called without a URL and the grabber carries no default target. An empty
    /// result, by contrast, means "the page has no reachable icons".
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The target URL could not be parsed, even after adding a default scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network operation failed.
    ///
    /// Covers connection, DNS, TLS and timeout failures while resolving the
    /// root page, as well as HTTP client construction failures.
    ///
    /// ## Recoverability
    ///
    /// Connection and timeout errors are typically recoverable.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The root page answered `404 Not Found`.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The root page answered with a non-success status other than 404.
    #[error("HTTP {status} while fetching '{url}'")]
    HttpStatus {
        /// URL that produced the status.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },

    /// Operation timed out.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - Invalid TOML syntax in the config file
    /// - Zero timeouts, or concurrency outside `1..=MAX_CONCURRENCY`
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed (configuration file access).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("Failed to parse config: {err}"))
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// grabicon never retries on its own; this is a hint for callers that want
    /// to.
    ///
    /// ```rust
    /// use grabicon::Error;
    ///
    /// assert!(Error::Timeout("slow host".to_string()).is_recoverable());
    /// assert!(Error::HttpStatus { url: "http://h/".into(), status: 503 }.is_recoverable());
    /// assert!(!Error::InvalidArgument("no url".to_string()).is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout(_) => true,
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// - `"invalid_argument"` - no target supplied
    /// - `"invalid_url"` - target URL could not be parsed
    /// - `"network"` - transport failures
    /// - `"not_found"` - root page answered 404
    /// - `"http_status"` - root page answered another non-success status
    /// - `"timeout"` - operation timeouts
    /// - `"config"` - configuration problems
    /// - `"io"` - file system operations
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Network(_) => "network",
            Self::NotFound(_) => "not_found",
            Self::HttpStatus { .. } => "http_status",
            Self::Timeout(_) => "timeout",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }

    /// Map a transport error, splitting timeouts out into [`Error::Timeout`].
    pub(crate) fn from_transport(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("request to '{url}' timed out"))
        } else {
            Self::Network(err)
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
