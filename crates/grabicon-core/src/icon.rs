//! Result records produced by the fetch stage.

use serde::Serialize;
use std::fmt;

/// A fetched resource whose leading bytes identify it as an image.
///
/// Only ever built from bytes whose sniffed content type contains `image`,
/// so `content_type` and `extension` are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    /// Final URL of the fetch, after redirects.
    pub url: String,
    /// Raw response body.
    #[serde(skip)]
    pub data: Vec<u8>,
    /// Length of `data` in bytes.
    pub size: usize,
    /// Content type derived from the binary signature, e.g. `image/png`.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Conventional extension for the sniffed format, e.g. `ico`.
    pub extension: String,
    /// Pixel width read from the image header, when readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height read from the image header, when readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Why a candidate produced no icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SkipReason {
    /// Transport failure, timeout or an unfetchable URL.
    Request {
        /// Rendered transport error.
        message: String,
    },
    /// The server answered with a non-success status.
    Status {
        /// Status code returned.
        code: u16,
    },
    /// The body went past the configured size limit.
    TooLarge {
        /// Bytes received or declared when the download was abandoned.
        size: u64,
        /// Configured limit.
        limit: u64,
    },
    /// The leading bytes match no image signature.
    NotImage,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request { message } => write!(f, "request failed: {message}"),
            Self::Status { code } => write!(f, "HTTP {code}"),
            Self::TooLarge { size, limit } => {
                write!(f, "body of {size} bytes exceeds limit of {limit}")
            },
            Self::NotImage => f.write_str("not an image"),
        }
    }
}

/// A candidate that was fetched (or attempted) and rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCandidate {
    /// Candidate URL as requested.
    pub url: String,
    /// Why it was rejected.
    pub reason: SkipReason,
}

/// Outcome of fetching and validating one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The candidate is an image.
    Found(Icon),
    /// The candidate was rejected.
    Skipped(SkippedCandidate),
}

impl FetchOutcome {
    /// The icon, if one was found.
    #[must_use]
    pub fn into_icon(self) -> Option<Icon> {
        match self {
            Self::Found(icon) => Some(icon),
            Self::Skipped(_) => None,
        }
    }
}
