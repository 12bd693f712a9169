//! Shared model and chronological core for the two-track diary.
//!
//! A story is a list of chapters; each chapter carries a clinical and a
//! personal list of dated events written by hand ("Early January 2020",
//! "Summer 2020", "2020-03-15"). This crate turns those loose dates into
//! comparable [`Instant`]s and lays the two tracks out side by side
//! ([`merge_chronological`]) or as one interleaved list ([`merge_interleaved`]).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

mod date;
mod label;
mod merge;
pub mod vibe;
pub mod viewport;

pub use date::{DateError, DateExpr, Instant, Qualifier, Season, normalize_strict, normalize_timestamp};
pub use label::{format_anchor_date, format_spine_label};
pub use merge::{ChapterLayout, Row, TimelineNode, merge_chronological, merge_interleaved};
pub use vibe::{Vibe, VibeStyle, vibe_style};

// ── Track ────────────────────────────────────────────────────────────────

/// Which of the two parallel narrative threads an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Clinical,
    Personal,
}

impl Track {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clinical => "clinical",
            Self::Personal => "personal",
        }
    }
}

// ── Embedded citation ────────────────────────────────────────────────────

static TWEET_STATUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"status/([0-9]+)").expect("tweet status regex"));

/// External citation attached to an event. Opaque to the merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

impl Embed {
    /// Status id of a `tweet` embed, taken from the `status/<id>` path segment.
    pub fn tweet_id(&self) -> Option<&str> {
        if self.kind != "tweet" {
            return None;
        }
        TWEET_STATUS
            .captures(&self.url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

// ── Dated event ──────────────────────────────────────────────────────────

/// A single entry in one track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedEvent {
    /// Free-form date expression. Missing dates sort first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub label: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed: Option<Embed>,
}

impl DatedEvent {
    pub fn new(date: impl Into<String>, label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            label: label.into(),
            content: content.into(),
            embed: None,
        }
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Sort key for this event.
    pub fn instant(&self) -> Instant {
        normalize_timestamp(self.date())
    }
}

// ── Chapter ──────────────────────────────────────────────────────────────

/// How a chapter lays out its two tracks. Anything other than `split`
/// in content is read as `full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Split,
    #[default]
    #[serde(other)]
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter_number: u32,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub date_range: String,
    /// Categorical mood tag, e.g. "Chaos / Urgency".
    #[serde(default)]
    pub vibe: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibe_description: Option<String>,
    #[serde(default)]
    pub layout: Layout,
    /// ISO date shown on the navigation rail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_date: Option<String>,
    #[serde(default)]
    pub clinical_nodes: Vec<DatedEvent>,
    #[serde(default)]
    pub personal_nodes: Vec<DatedEvent>,
}

impl Chapter {
    pub fn style(&self) -> &'static VibeStyle {
        vibe_style(&self.vibe)
    }

    /// Merged rows or interleaved nodes, depending on [`Chapter::layout`].
    pub fn arrange(&self) -> ChapterLayout<'_> {
        ChapterLayout::for_chapter(self)
    }

    /// Both tracks in source order, clinical first.
    pub fn nodes(&self) -> impl Iterator<Item = (Track, usize, &DatedEvent)> {
        let clinical = self
            .clinical_nodes
            .iter()
            .enumerate()
            .map(|(i, e)| (Track::Clinical, i, e));
        let personal = self
            .personal_nodes
            .iter()
            .enumerate()
            .map(|(i, e)| (Track::Personal, i, e));
        clinical.chain(personal)
    }
}

// ── Story file ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
}

/// The whole content store: `chapters.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Story {
    #[serde(default)]
    pub meta: StoryMeta,
    pub chapters: Vec<Chapter>,
}

impl Story {
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.chapter_number == number)
    }
}
