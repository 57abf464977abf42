//! # grabicon
//!
//! Discover, fetch and validate every favicon attached to a webpage.
//!
//! Given a URL, grabicon resolves redirects, scans the page for icon `<link>`
//! declarations, adds the well-known default icon paths, fetches every
//! candidate and keeps only the responses whose leading bytes identify them as
//! images. Headers and file extensions are never trusted.
//!
//! ## Architecture
//!
//! The pipeline is strictly linear:
//!
//! - **Session**: scheme defaulting, root page fetch, redirect resolution
//! - **Markup**: icon `<link>` scanning over the parsed page
//! - **Normalize**: raw `href` to absolute URL against the resolved page
//! - **Candidates**: markup icons plus default paths, deduplicated
//! - **Grabber**: bounded-concurrency fetch, signature sniffing, results
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # async fn run() -> grabicon::Result<()> {
//! let icons = grabicon::grab("example.com").await?;
//! for icon in &icons {
//!     println!("{} ({}, {} bytes)", icon.url, icon.content_type, icon.size);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Only a missing target or an unreachable root page is an error. A page with
//! no reachable icons yields an empty list:
//!
//! ```rust,no_run
//! use grabicon::{Error, FaviconGrabber, GrabConfig};
//!
//! # async fn run() -> grabicon::Result<()> {
//! let grabber = FaviconGrabber::new(GrabConfig::default())?;
//! match grabber.grab(Some("example.com")).await {
//!     Ok(icons) if icons.is_empty() => println!("no icons"),
//!     Ok(icons) => println!("{} icons", icons.len()),
//!     Err(Error::InvalidArgument(msg)) => eprintln!("usage: {msg}"),
//!     Err(e) if e.is_recoverable() => eprintln!("try again later: {e}"),
//!     Err(e) => eprintln!("failed: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

/// Candidate aggregation and default icon paths
pub mod candidates;
/// Configuration loading and defaults
pub mod config;
/// Error types and result aliases
pub mod error;
/// HTTP fetching with redirect tracking and size limits
pub mod fetcher;
/// Discovery pipeline orchestration
pub mod grabber;
/// Icon and skip records
pub mod icon;
/// HTML parsing and icon link scanning
pub mod markup;
/// Relative-to-absolute URL normalization
pub mod normalize;
/// Per-run root page state
pub mod session;
/// Binary signature sniffing
pub mod sniff;

// Re-export commonly used types
pub use config::GrabConfig;
pub use error::{Error, Result};
pub use fetcher::Fetcher;
pub use grabber::{FaviconGrabber, GrabReport, grab};
pub use icon::{FetchOutcome, Icon, SkipReason, SkippedCandidate};
