//! Chronological merge of the clinical and personal tracks.

use std::cmp::Ordering;

use serde::Serialize;

use crate::date::Instant;
use crate::{Chapter, DatedEvent, Layout, Track};

// ── Tagged node ──────────────────────────────────────────────────────────

/// An event tagged with its track and normalized sort key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineNode<'a> {
    pub track: Track,
    pub instant: Instant,
    #[serde(flatten)]
    pub event: &'a DatedEvent,
}

fn tag(events: &[DatedEvent], track: Track) -> impl Iterator<Item = TimelineNode<'_>> {
    events.iter().map(move |event| TimelineNode {
        track,
        instant: event.instant(),
        event,
    })
}

/// Tag a track and stable-sort it by instant.
fn sorted(events: &[DatedEvent], track: Track) -> Vec<TimelineNode<'_>> {
    let mut nodes: Vec<TimelineNode<'_>> = tag(events, track).collect();
    nodes.sort_by_key(|n| n.instant);
    nodes
}

// ── Row ──────────────────────────────────────────────────────────────────

/// One slot of the split layout. A row always holds at least one event;
/// a paired row holds two events with equal instants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Row<'a> {
    Clinical {
        clinical: TimelineNode<'a>,
    },
    Personal {
        personal: TimelineNode<'a>,
    },
    Paired {
        clinical: TimelineNode<'a>,
        personal: TimelineNode<'a>,
    },
}

impl<'a> Row<'a> {
    pub fn clinical(&self) -> Option<TimelineNode<'a>> {
        match *self {
            Self::Clinical { clinical } | Self::Paired { clinical, .. } => Some(clinical),
            Self::Personal { .. } => None,
        }
    }

    pub fn personal(&self) -> Option<TimelineNode<'a>> {
        match *self {
            Self::Personal { personal } | Self::Paired { personal, .. } => Some(personal),
            Self::Clinical { .. } => None,
        }
    }

    pub fn side(&self, track: Track) -> Option<TimelineNode<'a>> {
        match track {
            Track::Clinical => self.clinical(),
            Track::Personal => self.personal(),
        }
    }

    pub fn is_paired(&self) -> bool {
        matches!(self, Self::Paired { .. })
    }

    /// Instant shared by every event in the row.
    pub fn instant(&self) -> Instant {
        match self {
            Self::Clinical { clinical } | Self::Paired { clinical, .. } => clinical.instant,
            Self::Personal { personal } => personal.instant,
        }
    }
}

// ── Merges ───────────────────────────────────────────────────────────────

/// Pair two tracks into rows for the split layout.
///
/// Each track is stable-sorted by instant, then a two-pointer walk emits
/// the earlier side alone, or both sides together when their instants are
/// equal. Every input event lands in exactly one row, on its own side.
pub fn merge_chronological<'a>(
    clinical: &'a [DatedEvent],
    personal: &'a [DatedEvent],
) -> Vec<Row<'a>> {
    let clinical = sorted(clinical, Track::Clinical);
    let personal = sorted(personal, Track::Personal);

    let mut rows = Vec::with_capacity(clinical.len() + personal.len());
    let mut ci = 0;
    let mut pi = 0;

    loop {
        let row = match (clinical.get(ci).copied(), personal.get(pi).copied()) {
            (None, None) => break,
            (Some(c), None) => {
                ci += 1;
                Row::Clinical { clinical: c }
            }
            (None, Some(p)) => {
                pi += 1;
                Row::Personal { personal: p }
            }
            (Some(c), Some(p)) => match c.instant.cmp(&p.instant) {
                Ordering::Less => {
                    ci += 1;
                    Row::Clinical { clinical: c }
                }
                Ordering::Greater => {
                    pi += 1;
                    Row::Personal { personal: p }
                }
                Ordering::Equal => {
                    ci += 1;
                    pi += 1;
                    Row::Paired {
                        clinical: c,
                        personal: p,
                    }
                }
            },
        };
        rows.push(row);
    }

    rows
}

/// One flat chronological list for the full layout.
///
/// Ties keep concatenation order: at equal instants every clinical event
/// precedes every personal one, each track in source order.
pub fn merge_interleaved<'a>(
    clinical: &'a [DatedEvent],
    personal: &'a [DatedEvent],
) -> Vec<TimelineNode<'a>> {
    let mut nodes: Vec<TimelineNode<'a>> = tag(clinical, Track::Clinical)
        .chain(tag(personal, Track::Personal))
        .collect();
    nodes.sort_by_key(|n| n.instant);
    nodes
}

// ── Chapter dispatch ─────────────────────────────────────────────────────

/// What the presentation layer paints for one chapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "items", rename_all = "snake_case")]
pub enum ChapterLayout<'a> {
    Split(Vec<Row<'a>>),
    Full(Vec<TimelineNode<'a>>),
}

impl<'a> ChapterLayout<'a> {
    pub fn for_chapter(chapter: &'a Chapter) -> Self {
        match chapter.layout {
            Layout::Split => Self::Split(merge_chronological(
                &chapter.clinical_nodes,
                &chapter.personal_nodes,
            )),
            Layout::Full => Self::Full(merge_interleaved(
                &chapter.clinical_nodes,
                &chapter.personal_nodes,
            )),
        }
    }

    /// Number of rows (split) or nodes (full).
    pub fn len(&self) -> usize {
        match self {
            Self::Split(rows) => rows.len(),
            Self::Full(nodes) => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(date: &str, label: &str) -> DatedEvent {
        DatedEvent::new(date, label, "")
    }

    fn labels<'a>(row: &Row<'a>) -> (Option<&'a str>, Option<&'a str>) {
        (
            row.clinical().map(|n| n.event.label.as_str()),
            row.personal().map(|n| n.event.label.as_str()),
        )
    }

    #[test]
    fn test_equal_dates_share_a_row() {
        let clinical = vec![ev("2020-03-01", "c")];
        let personal = vec![ev("2020-03-01", "p")];
        let rows = merge_chronological(&clinical, &personal);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_paired());
        assert_eq!(labels(&rows[0]), (Some("c"), Some("p")));
    }

    #[test]
    fn test_interleaves_by_date() {
        let clinical = vec![ev("2020-01-01", "jan"), ev("2020-06-01", "jun")];
        let personal = vec![ev("2020-03-01", "mar")];
        let rows = merge_chronological(&clinical, &personal);
        let got: Vec<_> = rows.iter().map(labels).collect();
        assert_eq!(
            got,
            vec![
                (Some("jan"), None),
                (None, Some("mar")),
                (Some("jun"), None),
            ]
        );
    }

    #[test]
    fn test_sorts_unordered_input() {
        let clinical = vec![ev("Late March 2020", "late"), ev("Early March 2020", "early")];
        let personal = vec![ev("2020-03-25", "p")];
        let rows = merge_chronological(&clinical, &personal);
        let got: Vec<_> = rows.iter().map(labels).collect();
        assert_eq!(got, vec![(Some("early"), None), (Some("late"), Some("p"))]);
    }

    #[test]
    fn test_fuzzy_and_iso_pair_on_same_day() {
        let clinical = vec![ev("Summer 2020", "summer")];
        let personal = vec![ev("2020", "year")];
        let rows = merge_chronological(&clinical, &personal);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_paired());
    }

    #[test]
    fn test_stable_for_equal_instants() {
        let clinical = vec![
            ev("May 2020", "a"),
            ev("2020-01-01", "first"),
            ev("Mid May 2020", "b"),
            ev("2020-05-15", "c"),
        ];
        let rows = merge_chronological(&clinical, &[]);
        let got: Vec<&str> = rows
            .iter()
            .filter_map(|r| r.clinical())
            .map(|n| n.event.label.as_str())
            .collect();
        assert_eq!(got, vec!["first", "a", "b", "c"]);
    }

    #[test]
    fn test_surplus_equal_instants_stay_single() {
        let clinical = vec![ev("2020-04-01", "c1"), ev("2020-04-01", "c2")];
        let personal = vec![ev("2020-04-01", "p1")];
        let rows = merge_chronological(&clinical, &personal);
        let got: Vec<_> = rows.iter().map(labels).collect();
        assert_eq!(got, vec![(Some("c1"), Some("p1")), (Some("c2"), None)]);
    }

    #[test]
    fn test_unresolved_dates_sort_first() {
        let clinical = vec![ev("2019-12-31", "real"), ev("someday", "junk")];
        let personal = vec![DatedEvent {
            date: None,
            label: "undated".to_string(),
            content: String::new(),
            embed: None,
        }];
        let rows = merge_chronological(&clinical, &personal);
        let got: Vec<_> = rows.iter().map(labels).collect();
        assert_eq!(
            got,
            vec![(Some("junk"), Some("undated")), (Some("real"), None)]
        );
        assert!(rows[0].instant().is_sentinel());
    }

    #[test]
    fn test_empty_tracks() {
        assert!(merge_chronological(&[], &[]).is_empty());
        let personal = vec![ev("2020", "only")];
        let rows = merge_chronological(&[], &personal);
        assert_eq!(rows.len(), 1);
        assert_eq!(labels(&rows[0]), (None, Some("only")));
        assert_eq!(rows[0].side(Track::Personal).map(|n| n.track), Some(Track::Personal));
    }

    #[test]
    fn test_interleaved_tie_puts_clinical_first() {
        let clinical = vec![ev("2020-06-01", "c-late"), ev("2020-02-01", "c-tie")];
        let personal = vec![ev("2020-02-01", "p-tie"), ev("2020-01-01", "p-early")];
        let nodes = merge_interleaved(&clinical, &personal);
        let got: Vec<(Track, &str)> = nodes
            .iter()
            .map(|n| (n.track, n.event.label.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                (Track::Personal, "p-early"),
                (Track::Clinical, "c-tie"),
                (Track::Personal, "p-tie"),
                (Track::Clinical, "c-late"),
            ]
        );
    }

    #[test]
    fn test_chapter_layout_dispatch() {
        let mut chapter: Chapter = serde_json::from_str(
            r#"{"chapter_number": 1, "title": "t", "layout": "split",
                "clinical_nodes": [{"date": "2020-03-01", "label": "c", "content": ""}],
                "personal_nodes": [{"date": "2020-03-01", "label": "p", "content": ""}]}"#,
        )
        .unwrap();
        assert!(matches!(chapter.arrange(), ChapterLayout::Split(ref rows) if rows.len() == 1));

        chapter.layout = Layout::Full;
        let layout = chapter.arrange();
        assert!(matches!(layout, ChapterLayout::Full(ref nodes) if nodes.len() == 2));
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn test_row_serializes_with_kind_tag() {
        let clinical = vec![ev("2020-03-01", "c")];
        let rows = merge_chronological(&clinical, &[]);
        let json = serde_json::to_value(rows[0]).unwrap();
        assert_eq!(json["kind"], "clinical");
        assert_eq!(json["clinical"]["track"], "clinical");
        assert_eq!(json["clinical"]["instant"], "2020-03-01");
        assert_eq!(json["clinical"]["label"], "c");
    }
}
