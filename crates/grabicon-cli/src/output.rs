//! Output formats and rendering of discovery results.
//!
//! ```bash
//! grabicon example.com --format json
//! grabicon example.com --json        # Shorthand
//! grabicon example.com --jsonl
//! ```

use clap::{Args, ValueEnum};
use colored::Colorize;
use grabicon::{GrabReport, Icon, SkippedCandidate};
use is_terminal::IsTerminal;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output format for CLI results.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted text (default for terminals).
    #[default]
    Text,
    /// JSON format for machine consumption (default for pipes).
    Json,
    /// JSON Lines format (one JSON object per line).
    Jsonl,
}

impl OutputFormat {
    /// Check if this format is machine-readable (JSON or JSONL).
    #[must_use]
    pub const fn is_machine_readable(self) -> bool {
        matches!(self, Self::Json | Self::Jsonl)
    }

    /// Returns `Text` for interactive terminals, `Json` for pipes/redirects.
    #[must_use]
    pub fn detect() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Text
        } else {
            Self::Json
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Output format selection with automatic TTY detection.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputArgs {
    /// Output format (text, json, jsonl).
    ///
    /// Defaults to text for terminals, json for pipes.
    #[arg(short = 'f', long = "format", value_enum, env = "GRABICON_OUTPUT_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Output as JSON (shorthand for --format json).
    #[arg(long, conflicts_with = "format")]
    pub json: bool,

    /// Output as JSON Lines (shorthand for --format jsonl).
    #[arg(long, conflicts_with_all = ["format", "json"])]
    pub jsonl: bool,
}

impl OutputArgs {
    /// Resolve to a concrete format: shorthand flags, then `--format`, then
    /// TTY detection.
    #[must_use]
    pub fn resolve(&self) -> OutputFormat {
        if self.json {
            return OutputFormat::Json;
        }
        if self.jsonl {
            return OutputFormat::Jsonl;
        }
        self.format.unwrap_or_else(OutputFormat::detect)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IconEntry<'a> {
    #[serde(flatten)]
    icon: &'a Icon,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_to: Option<&'a Path>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Payload<'a> {
    resolved_url: &'a str,
    icons: Vec<IconEntry<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<&'a [SkippedCandidate]>,
}

#[derive(Serialize)]
#[serde(tag = "record", rename_all = "camelCase")]
enum Line<'a> {
    Icon(IconEntry<'a>),
    Skipped(&'a SkippedCandidate),
}

/// Write `report` to `out` in `format`.
///
/// `saved` holds the file each icon was written to, index-aligned with
/// `report.icons`; it is empty when nothing was saved.
pub fn render(
    report: &GrabReport,
    saved: &[PathBuf],
    format: OutputFormat,
    show_skipped: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let entries: Vec<IconEntry<'_>> = report
        .icons
        .iter()
        .enumerate()
        .map(|(i, icon)| IconEntry {
            icon,
            saved_to: saved.get(i).map(PathBuf::as_path),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let payload = Payload {
                resolved_url: &report.resolved_url,
                icons: entries,
                skipped: show_skipped.then_some(report.skipped.as_slice()),
            };
            serde_json::to_writer_pretty(&mut *out, &payload)?;
            writeln!(out)?;
        },
        OutputFormat::Jsonl => {
            for entry in entries {
                serde_json::to_writer(&mut *out, &Line::Icon(entry))?;
                writeln!(out)?;
            }
            if show_skipped {
                for skip in &report.skipped {
                    serde_json::to_writer(&mut *out, &Line::Skipped(skip))?;
                    writeln!(out)?;
                }
            }
        },
        OutputFormat::Text => render_text(report, &entries, show_skipped, out)?,
    }
    Ok(())
}

fn render_text(
    report: &GrabReport,
    entries: &[IconEntry<'_>],
    show_skipped: bool,
    out: &mut impl Write,
) -> std::io::Result<()> {
    if entries.is_empty() {
        writeln!(out, "No icons found for {}", report.resolved_url.bold())?;
    } else {
        writeln!(
            out,
            "{} icon(s) for {}",
            entries.len().to_string().green().bold(),
            report.resolved_url.bold()
        )?;
    }

    for entry in entries {
        let icon = entry.icon;
        let dims = match (icon.width, icon.height) {
            (Some(w), Some(h)) => format!("{w}x{h}"),
            _ => "?".to_string(),
        };
        writeln!(
            out,
            "  {}  {}  {}  {} bytes",
            icon.url,
            icon.content_type.cyan(),
            dims,
            icon.size
        )?;
        if let Some(path) = entry.saved_to {
            writeln!(out, "    {} {}", "saved".dimmed(), path.display())?;
        }
    }

    if show_skipped && !report.skipped.is_empty() {
        writeln!(out, "{}", "Skipped:".yellow())?;
        for skip in &report.skipped {
            writeln!(out, "  {}  ({})", skip.url, skip.reason)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use grabicon::SkipReason;

    fn report() -> GrabReport {
        GrabReport {
            resolved_url: "http://example.com/".into(),
            icons: vec![Icon {
                url: "http://example.com/favicon.ico".into(),
                data: vec![0, 0, 1, 0],
                size: 4,
                content_type: "image/x-icon".into(),
                extension: "ico".into(),
                width: Some(16),
                height: Some(16),
            }],
            skipped: vec![SkippedCandidate {
                url: "http://example.com/apple-touch-icon.png".into(),
                reason: SkipReason::Status { code: 404 },
            }],
        }
    }

    fn rendered(format: OutputFormat, saved: &[PathBuf], show_skipped: bool) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        render(&report(), saved, format, show_skipped, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_resolve_prefers_shorthand() {
        let args = OutputArgs {
            format: Some(OutputFormat::Text),
            json: true,
            jsonl: false,
        };
        assert_eq!(args.resolve(), OutputFormat::Json);

        let args = OutputArgs {
            format: Some(OutputFormat::Text),
            ..OutputArgs::default()
        };
        assert_eq!(args.resolve(), OutputFormat::Text);
    }

    #[test]
    fn test_json_payload() {
        let value: serde_json::Value =
            serde_json::from_str(&rendered(OutputFormat::Json, &[], false)).unwrap();
        assert_eq!(value["resolvedUrl"], "http://example.com/");
        assert_eq!(value["icons"][0]["type"], "image/x-icon");
        assert_eq!(value["icons"][0]["width"], 16);
        assert!(value["icons"][0].get("savedTo").is_none());
        assert!(value.get("skipped").is_none());
    }

    #[test]
    fn test_json_with_skipped_and_saved() {
        let saved = vec![PathBuf::from("/tmp/icons/favicon.ico")];
        let value: serde_json::Value =
            serde_json::from_str(&rendered(OutputFormat::Json, &saved, true)).unwrap();
        assert_eq!(value["icons"][0]["savedTo"], "/tmp/icons/favicon.ico");
        assert_eq!(value["skipped"][0]["reason"]["code"], 404);
    }

    #[test]
    fn test_jsonl_records() {
        let text = rendered(OutputFormat::Jsonl, &[], true);
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["record"], "icon");
        assert_eq!(lines[0]["extension"], "ico");
        assert_eq!(lines[1]["record"], "skipped");
        assert_eq!(lines[1]["reason"]["kind"], "status");
    }

    #[test]
    fn test_text_output() {
        let text = rendered(OutputFormat::Text, &[], true);
        assert!(text.contains("1 icon(s) for http://example.com/"));
        assert!(text.contains("http://example.com/favicon.ico"));
        assert!(text.contains("16x16"));
        assert!(text.contains("(HTTP 404)"));
    }

    #[test]
    fn test_text_output_without_icons() {
        colored::control::set_override(false);
        let empty = GrabReport {
            resolved_url: "http://example.com/".into(),
            icons: Vec::new(),
            skipped: Vec::new(),
        };
        let mut buf = Vec::new();
        render(&empty, &[], OutputFormat::Text, false, &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().starts_with("No icons found"));
    }
}
