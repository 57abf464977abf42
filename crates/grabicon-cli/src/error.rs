//! CLI error handling with semantic exit codes.
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Finished, including when no icons were found |
//! | 1 | `Internal` | Unexpected error, e.g. saving icons failed |
//! | 2 | `Usage` | Missing or invalid URL, bad or unreadable configuration |
//! | 3 | `NotFound` | The page answered 404 |
//! | 5 | `Network` | The page could not be fetched |
//! | 6 | `Timeout` | The page did not answer in time |
//!
//! ```bash
//! grabicon example.com --json > icons.json
//! case $? in
//!     0) echo "done" ;;
//!     3) echo "no such page" ;;
//!     *) echo "failed" ;;
//! esac
//! ```

use std::fmt;
use std::process::ExitCode;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments or configuration (exit code 2).
    Usage = 2,

    /// The page does not exist (exit code 3).
    NotFound = 3,

    /// Network or fetch failure (exit code 5).
    ///
    /// Also used when the page answers a non-success status other than 404.
    Network = 5,

    /// Operation timed out (exit code 6).
    Timeout = 6,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Create an `ExitCode` from this category.
    #[must_use]
    pub fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Network => "network error",
            Self::Timeout => "timeout",
        }
    }

    /// Category of a library error.
    #[must_use]
    pub const fn from_core(err: &grabicon::Error) -> Self {
        use grabicon::Error;
        match err {
            Error::InvalidArgument(_)
            | Error::InvalidUrl(_)
            | Error::Config(_)
            | Error::Io(_) => Self::Usage,
            Error::NotFound(_) => Self::NotFound,
            Error::Network(_) | Error::HttpStatus { .. } => Self::Network,
            Error::Timeout(_) => Self::Timeout,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Determine the category of an `anyhow::Error`.
///
/// An explicit [`CliError`] wins; otherwise the library error anywhere in the
/// chain decides; anything else is internal.
#[must_use]
pub fn category_from_error(err: &anyhow::Error) -> ErrorCategory {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.category;
    }

    err.chain()
        .find_map(|cause| cause.downcast_ref::<grabicon::Error>())
        .map_or(ErrorCategory::Internal, ErrorCategory::from_core)
}

/// Determine the exit code from an `anyhow::Error`.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    category_from_error(err).exit_code()
}
