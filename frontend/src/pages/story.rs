use leptos::prelude::*;
use pulse_core::format_anchor_date;

use crate::pages::{chapter::ChapterSection, rail::PulseRail};
use crate::types::{Selected, Story};

/// "Jan 2020 – Jun 2021" from the first and last chapter anchors.
fn date_span(story: &Story) -> String {
    let mut anchors = story.chapters.iter().filter_map(|c| c.anchor_date.as_deref());
    match anchors.next() {
        Some(first) => {
            let last = anchors.last().unwrap_or(first);
            format!("{} – {}", format_anchor_date(first), format_anchor_date(last))
        }
        None => String::new(),
    }
}

#[component]
pub fn StoryPage(
    story: Story,
    active: RwSignal<u32>,
    selected: RwSignal<Option<Selected>>,
) -> impl IntoView {
    let span = date_span(&story);
    let Story { meta, chapters } = story;

    view! {
        <div>
            <PulseRail chapters=chapters.clone() active=active/>
            <main class="story">
                <header class="hero">
                    <p class="hero-author">{meta.author.clone()}</p>
                    <h1 class="hero-title">{meta.title.clone()}</h1>
                    <p class="hero-span">{span}</p>
                    <div class="hero-legend">
                        <span class="legend clinical">"Clinical"</span>
                        <span class="legend personal">"Personal"</span>
                    </div>
                </header>
                {chapters
                    .into_iter()
                    .map(|chapter| view! { <ChapterSection chapter=chapter selected=selected/> })
                    .collect_view()}
                <footer class="story-footer">
                    <p>{meta.title} " · " {meta.author}</p>
                </footer>
            </main>
        </div>
    }
}
