use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use pulse_core::viewport::{ChapterGeometry, SectionBounds};

use crate::pages::{overlay::NodeOverlay, story::StoryPage};
use crate::types::{Selected, Story, fetch_story};

/// Element id of a chapter section, also the rail's anchor target.
pub fn section_id(chapter_number: u32) -> String {
    format!("chapter-{chapter_number}")
}

/// Chapter sections as laid out in the live document.
struct DomSections<'a> {
    numbers: &'a [u32],
}

impl ChapterGeometry for DomSections<'_> {
    fn viewport_height(&self) -> f64 {
        window()
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn section_bounds(&self) -> Vec<SectionBounds> {
        let doc = document();
        self.numbers
            .iter()
            .filter_map(|&n| {
                let rect = doc.get_element_by_id(&section_id(n))?.get_bounding_client_rect();
                Some(SectionBounds {
                    chapter_number: n,
                    top: rect.top(),
                    bottom: rect.bottom(),
                })
            })
            .collect()
    }
}

#[component]
pub fn App() -> impl IntoView {
    let data: RwSignal<Option<Result<Story, String>>> = RwSignal::new(None);
    let numbers: RwSignal<Vec<u32>> = RwSignal::new(Vec::new());
    let active = RwSignal::new(1u32);
    let selected: RwSignal<Option<Selected>> = RwSignal::new(None);

    spawn_local(async move {
        let result = fetch_story().await;
        if let Ok(story) = &result {
            numbers.set(story.chapters.iter().map(|c| c.chapter_number).collect());
            if let Some(first) = story.chapters.first() {
                active.set(first.chapter_number);
            }
        }
        data.set(Some(result));
    });

    let _scroll = window_event_listener(ev::scroll, move |_| {
        let current = numbers.with_untracked(|n| DomSections { numbers: n }.active_chapter());
        if let Some(n) = current
            && active.get_untracked() != n
        {
            active.set(n);
        }
    });

    view! {
        <div id="app" class="reader">
            {move || match data.get() {
                None => view! { <p class="loading">"Loading…"</p> }.into_any(),
                Some(Err(e)) => view! { <p class="error">{e}</p> }.into_any(),
                Some(Ok(story)) => {
                    view! { <StoryPage story=story active=active selected=selected/> }.into_any()
                }
            }}
            <NodeOverlay selected=selected/>
        </div>
    }
}
