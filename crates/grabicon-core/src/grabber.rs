//! The discovery pipeline.
//!
//! [`FaviconGrabber`] ties the stages together: resolve the root page, collect
//! candidates, then fetch and validate each candidate with bounded
//! concurrency. Per-candidate failures never escape; they become
//! [`SkippedCandidate`] records.

use crate::candidates::{self, Candidate};
use crate::fetcher::Body;
use crate::icon::{FetchOutcome, Icon, SkipReason, SkippedCandidate};
use crate::session::Session;
use crate::sniff;
use crate::{Error, Fetcher, GrabConfig, Result};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument};

/// Finds every valid icon attached to a page.
///
/// Holds only immutable state: configuration, the HTTP client and an optional
/// default target. Concurrent calls to [`grab`](Self::grab) never interfere.
///
/// ```rust,no_run
/// use grabicon::{FaviconGrabber, GrabConfig};
///
/// # async fn run() -> grabicon::Result<()> {
/// let grabber = FaviconGrabber::new(GrabConfig::default())?.with_target("example.com");
/// for icon in grabber.grab(None).await? {
///     println!("{} {} {} bytes", icon.url, icon.content_type, icon.size);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FaviconGrabber {
    fetcher: Fetcher,
    config: GrabConfig,
    target: Option<String>,
}

/// Everything one discovery run learned.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrabReport {
    /// Final root page URL after redirects.
    pub resolved_url: String,
    /// Validated icons, in no particular order.
    pub icons: Vec<Icon>,
    /// Candidates that yielded no icon.
    pub skipped: Vec<SkippedCandidate>,
}

impl FaviconGrabber {
    /// Build a grabber from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for invalid settings and [`Error::Network`]
    /// if the HTTP client cannot be built.
    pub fn new(config: GrabConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = Fetcher::from_config(&config)?;
        Ok(Self {
            fetcher,
            config,
            target: None,
        })
    }

    /// Set the page used when [`grab`](Self::grab) is called without a URL.
    #[must_use]
    pub fn with_target(mut self, url: impl Into<String>) -> Self {
        self.target = Some(url.into());
        self
    }

    /// Default target, if any.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Settings this grabber was built with.
    #[must_use]
    pub const fn config(&self) -> &GrabConfig {
        &self.config
    }

    /// Discover, fetch and validate every icon of `url` (or the default
    /// target when `url` is `None` or blank).
    ///
    /// An empty list means the page has no reachable icons.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when there is no URL to work on; otherwise
    /// any failure resolving the root page.
    pub async fn grab(&self, url: Option<&str>) -> Result<Vec<Icon>> {
        Ok(self.grab_report(url).await?.icons)
    }

    /// Like [`grab`](Self::grab), but also reports the resolved page URL and
    /// every rejected candidate with its reason.
    ///
    /// # Errors
    ///
    /// Same as [`grab`](Self::grab).
    #[instrument(skip(self), fields(target = ?self.target))]
    pub async fn grab_report(&self, url: Option<&str>) -> Result<GrabReport> {
        let raw = self.pick_target(url)?;

        // Markup trees are not Send; keep the session out of the fetch awaits.
        let (resolved_url, candidates) = {
            let session = Session::resolve(&self.fetcher, raw).await?;
            let candidates = candidates::collect(&session);
            (session.resolved_url().to_string(), candidates)
        };

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let tasks: Vec<_> = candidates
            .into_iter()
            .map(|candidate| {
                let semaphore = Arc::clone(&semaphore);
                async move {
                    let _permit = semaphore.acquire().await.ok();
                    self.fetch_candidate(&candidate).await
                }
            })
            .collect();

        let mut icons = Vec::new();
        let mut skipped = Vec::new();
        for outcome in join_all(tasks).await {
            match outcome {
                FetchOutcome::Found(icon) => icons.push(icon),
                FetchOutcome::Skipped(skip) => {
                    debug!(url = %skip.url, reason = %skip.reason, "skipped candidate");
                    skipped.push(skip);
                },
            }
        }

        info!(
            resolved = %resolved_url,
            icons = icons.len(),
            skipped = skipped.len(),
            "grab complete"
        );
        Ok(GrabReport {
            resolved_url,
            icons,
            skipped,
        })
    }

    /// Fetch one candidate and decide whether it is an icon. Never fails.
    pub async fn fetch_candidate(&self, candidate: &Candidate) -> FetchOutcome {
        let skip = |reason| {
            FetchOutcome::Skipped(SkippedCandidate {
                url: candidate.url.clone(),
                reason,
            })
        };

        let limit = self.config.max_icon_bytes;
        let fetched = match self.fetcher.fetch_bytes(&candidate.url, limit).await {
            Ok(fetched) => fetched,
            Err(err) => return skip(skip_reason(&err)),
        };

        let data = match fetched.body {
            Body::Complete(data) => data,
            Body::Oversized { size } => return skip(SkipReason::TooLarge { size, limit }),
        };

        let signature = sniff::sniff(&data);
        if !signature.is_image() {
            return skip(SkipReason::NotImage);
        }
        let (Some(content_type), Some(extension)) =
            (signature.primary_type(), signature.primary_extension())
        else {
            return skip(SkipReason::NotImage);
        };

        let dims = signature
            .format()
            .and_then(|format| sniff::dimensions(&data, format));

        FetchOutcome::Found(Icon {
            url: fetched.final_url,
            size: data.len(),
            content_type: content_type.to_string(),
            extension: extension.to_string(),
            width: dims.map(|(w, _)| w),
            height: dims.map(|(_, h)| h),
            data,
        })
    }

    fn pick_target<'a>(&'a self, url: Option<&'a str>) -> Result<&'a str> {
        url.filter(|u| !u.trim().is_empty())
            .or_else(|| self.target.as_deref().filter(|t| !t.trim().is_empty()))
            .ok_or_else(|| Error::InvalidArgument("no URL given and no target configured".into()))
    }
}

fn skip_reason(err: &Error) -> SkipReason {
    match err {
        Error::HttpStatus { status, .. } => SkipReason::Status { code: *status },
        Error::NotFound(_) => SkipReason::Status { code: 404 },
        other => SkipReason::Request {
            message: other.to_string(),
        },
    }
}

/// Grab icons for `url` with a default-configured grabber.
///
/// # Errors
///
/// See [`FaviconGrabber::grab`].
pub async fn grab(url: &str) -> Result<Vec<Icon>> {
    FaviconGrabber::new(GrabConfig::default())?
        .grab(Some(url))
        .await
}
