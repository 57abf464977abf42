//! Per-run state: the resolved root page.
//!
//! A [`Session`] is built at the start of every discovery run and dropped
//! before icons are fetched. Nothing in it outlives the run, so two runs can
//! never see each other's page.

use crate::markup::PageDocument;
use crate::{Error, Fetcher, Result};
use tracing::{debug, instrument};
use url::Url;

/// Scheme prepended to inputs that carry none.
pub const DEFAULT_SCHEME: &str = "http://";

/// The resolved root page of one discovery run.
#[derive(Debug)]
pub struct Session {
    raw_input: String,
    requested_url: String,
    resolved_url: Url,
    document: PageDocument,
}

impl Session {
    /// Resolve `raw` into a session: add a scheme if missing, GET the page
    /// following redirects, and parse the final response body.
    ///
    /// Any failure here is fatal to the run: without the root page there is
    /// no base URL and no markup.
    #[instrument(skip(fetcher), fields(raw = %raw))]
    pub async fn resolve(fetcher: &Fetcher, raw: &str) -> Result<Self> {
        let requested_url = with_default_scheme(raw.trim());
        Url::parse(&requested_url)
            .map_err(|e| Error::InvalidUrl(format!("'{raw}' is not a valid URL: {e}")))?;

        let page = fetcher.fetch_page(&requested_url).await?;
        debug!(
            resolved = %page.final_url,
            status = page.status,
            truncated = page.truncated,
            "resolved root page"
        );

        Ok(Self {
            raw_input: raw.to_string(),
            requested_url,
            resolved_url: page.final_url,
            document: PageDocument::parse(&page.text),
        })
    }

    /// Build a session from an already-fetched page.
    #[must_use]
    pub fn from_parts(raw: &str, resolved_url: Url, body: &str) -> Self {
        Self {
            raw_input: raw.to_string(),
            requested_url: with_default_scheme(raw.trim()),
            resolved_url,
            document: PageDocument::parse(body),
        }
    }

    /// The input exactly as given.
    #[must_use]
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// The input after scheme defaulting; what was actually requested.
    #[must_use]
    pub fn requested_url(&self) -> &str {
        &self.requested_url
    }

    /// Final page URL after redirects; the base for every candidate.
    #[must_use]
    pub const fn resolved_url(&self) -> &Url {
        &self.resolved_url
    }

    /// Parsed markup of the resolved page.
    #[must_use]
    pub const fn document(&self) -> &PageDocument {
        &self.document
    }
}

/// Prepend `http://` unless `raw` already starts with `http://` or
/// `https://` (in any case).
#[must_use]
pub fn with_default_scheme(raw: &str) -> String {
    let lower = raw.get(..8).unwrap_or(raw).to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{raw}")
    }
}
