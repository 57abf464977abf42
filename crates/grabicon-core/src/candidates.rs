//! Candidate aggregation: markup icons plus well-known default paths.

use crate::normalize::absolute_url;
use crate::session::Session;
use std::collections::HashSet;

/// Paths tried on every host regardless of what the markup declares.
pub const DEFAULT_ICON_PATHS: [&str; 3] = [
    "/favicon.ico",
    "/apple-touch-icon.png",
    "/apple-touch-icon-precomposed.png",
];

/// Where a candidate URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// An icon `<link>` in the page.
    Markup,
    /// One of [`DEFAULT_ICON_PATHS`].
    Default,
}

/// An absolute URL that may hold an icon.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// Absolute URL to fetch.
    pub url: String,
    /// Origin of the candidate.
    pub source: CandidateSource,
}

/// Unique candidates in discovery order: markup first, then defaults.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    seen: HashSet<String>,
    items: Vec<Candidate>,
}

impl CandidateSet {
    /// Add `url` unless an identical string is already present. Returns
    /// whether it was added.
    pub fn insert(&mut self, url: String, source: CandidateSource) -> bool {
        if !self.seen.insert(url.clone()) {
            return false;
        }
        self.items.push(Candidate { url, source });
        true
    }

    /// Number of unique candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Candidates in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.items.iter()
    }

    /// Whether `url` is already a candidate.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }
}

impl IntoIterator for CandidateSet {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Every candidate for `session`: normalized icon hrefs in document order,
/// then the default paths, deduplicated by exact string.
#[must_use]
pub fn collect(session: &Session) -> CandidateSet {
    let base = session.resolved_url();
    let mut set = CandidateSet::default();

    for href in session.document().icon_hrefs() {
        set.insert(absolute_url(&href, base), CandidateSource::Markup);
    }
    for path in DEFAULT_ICON_PATHS {
        set.insert(absolute_url(path, base), CandidateSource::Default);
    }

    tracing::debug!(candidates = set.len(), base = %base, "collected candidates");
    set
}
