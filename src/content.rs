//! Loading and validating story files (`chapters.json`).
//!
//! Shape errors (a node without `label`, a chapter without `title`) are
//! rejected by deserialization. Everything the merge would tolerate but an
//! author probably did not intend is reported as a [`ContentIssue`].

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use pulse_core::{DateExpr, Story, Track, Vibe, normalize_strict};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("cannot read {path}: {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}", path = path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} has {count} content error(s)", path = path.display(), count = issues.len())]
    Invalid {
        path: PathBuf,
        issues: Vec<ContentIssue>,
    },
}

// ── Issues ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum IssueKind {
    DuplicateChapter,
    OutOfOrder { previous: u32 },
    EmptyTitle,
    EmptyLabel { track: Track, index: usize },
    AnchorNotIso { anchor: String },
    UnknownVibe { vibe: String },
    UnresolvedDate {
        track: Track,
        index: usize,
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        date: Option<String>,
        reason: String,
    },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateChapter => f.write_str("chapter number used more than once"),
            Self::OutOfOrder { previous } => write!(f, "follows chapter {previous}"),
            Self::EmptyTitle => f.write_str("empty title"),
            Self::EmptyLabel { track, index } => {
                write!(f, "{} node #{index} has an empty label", track.as_str())
            }
            Self::AnchorNotIso { anchor } => write!(f, "anchor_date {anchor:?} is not YYYY-MM-DD"),
            Self::UnknownVibe { vibe } => write!(f, "unknown vibe {vibe:?}, using fallback style"),
            Self::UnresolvedDate {
                track,
                index,
                label,
                reason,
                ..
            } => write!(
                f,
                "{} node #{index} ({label:?}): {reason}; sorts first",
                track.as_str()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentIssue {
    pub chapter: u32,
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl ContentIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{tag}: chapter {}: {}", self.chapter, self.kind)
    }
}

// ── Loading ──────────────────────────────────────────────────────────────

pub fn parse_story(path: &Path, json: &str) -> Result<Story, ContentError> {
    serde_json::from_str(json).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_story(path: &Path) -> Result<Story, ContentError> {
    let json = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let story = parse_story(path, &json)?;
    tracing::debug!(path = %path.display(), chapters = story.chapters.len(), "loaded story");
    Ok(story)
}

/// Load a story and refuse it if validation finds any error.
/// Warnings are logged and otherwise ignored.
pub fn load_validated(path: &Path, strict: bool) -> Result<Story, ContentError> {
    let story = load_story(path)?;
    let issues = validate_story(&story, strict);
    for issue in issues.iter().filter(|i| !i.is_error()) {
        tracing::warn!(path = %path.display(), "{issue}");
    }
    if issues.iter().any(ContentIssue::is_error) {
        return Err(ContentError::Invalid {
            path: path.to_path_buf(),
            issues: issues.into_iter().filter(ContentIssue::is_error).collect(),
        });
    }
    Ok(story)
}

// ── Validation ───────────────────────────────────────────────────────────

/// Check a story for authoring mistakes.
///
/// Unresolved dates are warnings, or errors when `strict` is set. The
/// merge never rejects them; they sort before every dated event.
pub fn validate_story(story: &Story, strict: bool) -> Vec<ContentIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();
    let mut previous: Option<u32> = None;

    for chapter in &story.chapters {
        let n = chapter.chapter_number;
        let mut push = |severity, kind| {
            issues.push(ContentIssue {
                chapter: n,
                severity,
                kind,
            })
        };

        if !seen.insert(n) {
            push(Severity::Error, IssueKind::DuplicateChapter);
        } else if let Some(prev) = previous
            && n < prev
        {
            push(Severity::Error, IssueKind::OutOfOrder { previous: prev });
        }
        previous = Some(n);

        if chapter.title.trim().is_empty() {
            push(Severity::Error, IssueKind::EmptyTitle);
        }

        if let Some(anchor) = &chapter.anchor_date
            && !matches!(DateExpr::classify(anchor.as_str()), DateExpr::Iso(_))
        {
            push(
                Severity::Error,
                IssueKind::AnchorNotIso {
                    anchor: anchor.clone(),
                },
            );
        }

        if !chapter.vibe.is_empty() && Vibe::from_tag(&chapter.vibe).is_none() {
            push(
                Severity::Warning,
                IssueKind::UnknownVibe {
                    vibe: chapter.vibe.clone(),
                },
            );
        }

        for (track, index, event) in chapter.nodes() {
            if event.label.trim().is_empty() {
                push(Severity::Error, IssueKind::EmptyLabel { track, index });
            }
            if let Err(reason) = normalize_strict(event.date()) {
                let severity = if strict {
                    Severity::Error
                } else {
                    Severity::Warning
                };
                push(
                    severity,
                    IssueKind::UnresolvedDate {
                        track,
                        index,
                        label: event.label.clone(),
                        date: event.date.clone(),
                        reason: reason.to_string(),
                    },
                );
            }
        }
    }

    issues
}
