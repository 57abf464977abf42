//! Parsed page markup and icon link scanning.
//!
//! [`PageDocument`] wraps a parsed HTML tree and exposes one narrow query:
//! find elements by tag name whose attribute matches one of a set of values,
//! ignoring ASCII case. Icon discovery is built on top of that query.

use scraper::{Html, Selector};

/// `rel` values that declare an icon.
pub const ICON_RELS: [&str; 4] = [
    "icon",
    "shortcut icon",
    "apple-touch-icon",
    "apple-touch-icon-precomposed",
];

/// A parsed HTML document.
pub struct PageDocument {
    html: Html,
}

impl std::fmt::Debug for PageDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageDocument")
            .field("errors", &self.html.errors.len())
            .finish_non_exhaustive()
    }
}

impl PageDocument {
    /// Parse `text` as an HTML document. Parsing is lenient and never fails.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            html: Html::parse_document(text),
        }
    }

    /// Find `tag` elements whose `attr` matches one of `values` and return
    /// each element's `read` attribute (`None` when the element lacks it).
    ///
    /// An attribute matches when its whitespace-collapsed value equals one of
    /// `values`, or when any single whitespace-separated token does. Both
    /// comparisons ignore ASCII case.
    #[must_use]
    pub fn find_elements(
        &self,
        tag: &str,
        attr: &str,
        values: &[&str],
        read: &str,
    ) -> Vec<Option<String>> {
        let Ok(selector) = Selector::parse(&format!("{tag}[{attr}]")) else {
            return Vec::new();
        };

        self.html
            .select(&selector)
            .filter(|element| {
                element
                    .value()
                    .attr(attr)
                    .is_some_and(|value| attr_matches(value, values))
            })
            .map(|element| element.value().attr(read).map(str::to_string))
            .collect()
    }

    /// Raw `href` values of every icon `<link>` in document order.
    ///
    /// A matching link without an `href` yields an empty string; it flows on
    /// through normalization and is dropped when its fetch fails.
    #[must_use]
    pub fn icon_hrefs(&self) -> Vec<String> {
        self.find_elements("link", "rel", &ICON_RELS, "href")
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect()
    }
}

fn attr_matches(value: &str, wanted: &[&str]) -> bool {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if wanted.iter().any(|w| w.eq_ignore_ascii_case(&collapsed)) {
        return true;
    }
    value
        .split_whitespace()
        .any(|token| wanted.iter().any(|w| w.eq_ignore_ascii_case(token)))
}
