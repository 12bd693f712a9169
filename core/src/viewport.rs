//! Reading-position geometry for the navigation rail.
//!
//! The reader measures chapter sections in viewport coordinates and asks
//! which chapter currently fills most of the screen.

/// Vertical extent of one chapter section, relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub chapter_number: u32,
    pub top: f64,
    pub bottom: f64,
}

impl SectionBounds {
    /// Height of the section that is inside `[0, viewport_height]`.
    pub fn visible_overlap(&self, viewport_height: f64) -> f64 {
        (self.bottom.min(viewport_height) - self.top.max(0.0)).max(0.0)
    }
}

/// Source of section measurements; the browser reader implements this
/// over the DOM, tests over fixed rectangles.
pub trait ChapterGeometry {
    fn viewport_height(&self) -> f64;
    fn section_bounds(&self) -> Vec<SectionBounds>;

    fn active_chapter(&self) -> Option<u32> {
        active_chapter(self.viewport_height(), self.section_bounds())
    }
}

/// Chapter with the largest visible overlap. The first section wins ties;
/// `None` when nothing is on screen.
pub fn active_chapter(
    viewport_height: f64,
    sections: impl IntoIterator<Item = SectionBounds>,
) -> Option<u32> {
    let mut best = None;
    let mut best_overlap = 0.0;
    for section in sections {
        let overlap = section.visible_overlap(viewport_height);
        if overlap > best_overlap {
            best_overlap = overlap;
            best = Some(section.chapter_number);
        }
    }
    best
}

/// Rail fill in percent for chapter `active` (1-based) of `total`.
pub fn rail_progress(active: u32, total: usize) -> f64 {
    if total <= 1 {
        return 0.0;
    }
    let done = f64::from(active.saturating_sub(1));
    (done / (total - 1) as f64 * 100.0).clamp(0.0, 100.0)
}
