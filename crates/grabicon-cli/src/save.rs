//! Writing icon bytes to disk.

use anyhow::{Context, Result};
use grabicon::Icon;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Write every icon into `dir`, creating it if needed. Returns the written
/// paths, index-aligned with `icons`.
pub fn save_icons(icons: &[Icon], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory '{}'", dir.display()))?;

    let mut used = HashSet::new();
    let mut written = Vec::with_capacity(icons.len());
    for (index, icon) in icons.iter().enumerate() {
        let name = unique_name(file_name_for(icon, index), index, &mut used);
        let path = dir.join(name);
        fs::write(&path, &icon.data)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        debug!(path = %path.display(), bytes = icon.size, "saved icon");
        written.push(path);
    }
    Ok(written)
}

/// File name for an icon: the last URL path segment with unsafe characters
/// replaced, forced to end in the sniffed extension.
#[must_use]
pub fn file_name_for(icon: &Icon, index: usize) -> String {
    let segment = Url::parse(&icon.url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .unwrap_or_default();

    let stem: String = segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_matches('.');

    if stem.is_empty() {
        return format!("icon-{index}.{}", icon.extension);
    }

    let has_extension = Path::new(stem)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(&icon.extension));
    if has_extension {
        stem.to_string()
    } else {
        format!("{stem}.{}", icon.extension)
    }
}

fn unique_name(name: String, index: usize, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }
    let mut candidate = format!("{index}-{name}");
    let mut attempt = 1usize;
    while !used.insert(candidate.clone()) {
        candidate = format!("{index}-{attempt}-{name}");
        attempt += 1;
    }
    candidate
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn icon(url: &str, extension: &str) -> Icon {
        Icon {
            url: url.to_string(),
            data: vec![1, 2, 3],
            size: 3,
            content_type: format!("image/{extension}"),
            extension: extension.to_string(),
            width: None,
            height: None,
        }
    }

    #[test]
    fn test_name_from_last_segment() {
        assert_eq!(
            file_name_for(&icon("http://h/static/favicon.ico", "ico"), 0),
            "favicon.ico"
        );
        assert_eq!(
            file_name_for(&icon("http://h/apple-touch-icon.png?v=2", "png"), 0),
            "apple-touch-icon.png"
        );
    }

    #[test]
    fn test_sniffed_extension_is_appended() {
        assert_eq!(
            file_name_for(&icon("http://h/favicon.ico", "png"), 0),
            "favicon.ico.png"
        );
        assert_eq!(file_name_for(&icon("http://h/icon", "gif"), 0), "icon.gif");
    }

    #[test]
    fn test_empty_segment_uses_index() {
        assert_eq!(file_name_for(&icon("http://h/", "ico"), 4), "icon-4.ico");
        assert_eq!(file_name_for(&icon("not a url", "ico"), 1), "icon-1.ico");
    }

    #[test]
    fn test_unsafe_characters_replaced() {
        assert_eq!(
            file_name_for(&icon("http://h/a%20b%2Fc.png", "png"), 0),
            "a_20b_2Fc.png"
        );
    }

    #[test]
    fn test_save_icons_writes_unique_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("nested");
        let icons = vec![
            icon("http://a.example/favicon.ico", "ico"),
            icon("http://b.example/favicon.ico", "ico"),
        ];

        let paths = save_icons(&icons, &out)?;
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].file_name().unwrap(), "favicon.ico");
        assert_eq!(paths[1].file_name().unwrap(), "1-favicon.ico");
        for path in &paths {
            assert_eq!(fs::read(path)?, vec![1, 2, 3]);
        }
        Ok(())
    }

    #[test]
    fn test_prefixed_name_never_overwrites_earlier_icon() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let icons: Vec<Icon> = [
            "http://a/favicon.ico",
            "http://b/2-favicon.ico",
            "http://c/favicon.ico",
        ]
        .iter()
        .zip(1u8..)
        .map(|(url, byte)| Icon {
            data: vec![byte],
            size: 1,
            ..icon(url, "ico")
        })
        .collect();

        let paths = save_icons(&icons, dir.path())?;
        let distinct: HashSet<_> = paths.iter().collect();
        assert_eq!(distinct.len(), 3);
        assert_eq!(paths[1].file_name().unwrap(), "2-favicon.ico");
        assert_eq!(paths[2].file_name().unwrap(), "2-1-favicon.ico");
        for (path, icon) in paths.iter().zip(&icons) {
            assert_eq!(fs::read(path)?, icon.data);
        }
        Ok(())
    }

    #[test]
    fn test_unique_name_skips_taken_suffixes() {
        let mut used: HashSet<String> = ["x.ico", "3-x.ico", "3-1-x.ico"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(unique_name("x.ico".into(), 3, &mut used), "3-2-x.ico");
        assert!(used.contains("3-2-x.ico"));
    }
}
