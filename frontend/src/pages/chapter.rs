use leptos::prelude::*;
use pulse_core::{format_spine_label, merge_chronological, merge_interleaved};

use crate::app::section_id;
use crate::types::{Chapter, DatedEvent, Layout, Selected, Track};

#[component]
pub fn ChapterSection(chapter: Chapter, selected: RwSignal<Option<Selected>>) -> impl IntoView {
    let style = chapter.style();
    let body = match chapter.layout {
        Layout::Split => view! { <SplitLayout chapter=chapter.clone() selected=selected/> }.into_any(),
        Layout::Full => view! { <FullLayout chapter=chapter.clone() selected=selected/> }.into_any(),
    };

    view! {
        <section id=section_id(chapter.chapter_number) class="chapter">
            <div class=format!("chapter-backdrop bg-gradient-to-b {}", style.gradient)></div>
            <header class="chapter-header">
                <div class="chapter-badge">
                    <span>{style.icon}</span>
                    <span>"Chapter " {chapter.chapter_number}</span>
                    <span class="badge-sep">"|"</span>
                    <span>{chapter.date_range.clone()}</span>
                </div>
                <h2 class="chapter-title">{chapter.title.clone()}</h2>
                <p class="chapter-subtitle">{chapter.subtitle.clone()}</p>
                {(!chapter.vibe.is_empty()).then(|| view! {
                    <div class="vibe-tag">
                        <span class="vibe-key">"Vibe"</span>
                        <span>{chapter.vibe.clone()}</span>
                    </div>
                })}
                {chapter.vibe_description.clone().map(|d| view! { <p class="vibe-description">{d}</p> })}
            </header>
            <div class="chapter-body">{body}</div>
        </section>
    }
}

fn column_title(track: Track) -> &'static str {
    match track {
        Track::Clinical => "Clinical Timeline",
        Track::Personal => "Personal Timeline",
    }
}

/// Two columns; each row holds one or two same-instant events.
#[component]
fn SplitLayout(chapter: Chapter, selected: RwSignal<Option<Selected>>) -> impl IntoView {
    let rows: Vec<(Option<DatedEvent>, Option<DatedEvent>)> =
        merge_chronological(&chapter.clinical_nodes, &chapter.personal_nodes)
            .iter()
            .map(|row| {
                (
                    row.clinical().map(|n| n.event.clone()),
                    row.personal().map(|n| n.event.clone()),
                )
            })
            .collect();

    view! {
        <div class="split">
            <div class="split-headings">
                <h3 class="column-title clinical">{column_title(Track::Clinical)}</h3>
                <h3 class="column-title personal">{column_title(Track::Personal)}</h3>
            </div>
            <div class="split-rows">
                {rows
                    .into_iter()
                    .enumerate()
                    .map(|(i, (clinical, personal))| view! {
                        <div class="split-cell">
                            {clinical.map(|event| view! {
                                <NodeCard event=event track=Track::Clinical index=i selected=selected/>
                            })}
                        </div>
                        <div class="split-cell">
                            {personal.map(|event| view! {
                                <NodeCard event=event track=Track::Personal index=i selected=selected/>
                            })}
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// A single spine with both tracks interleaved by date.
#[component]
fn FullLayout(chapter: Chapter, selected: RwSignal<Option<Selected>>) -> impl IntoView {
    let nodes: Vec<(Track, String, DatedEvent)> =
        merge_interleaved(&chapter.clinical_nodes, &chapter.personal_nodes)
            .into_iter()
            .map(|n| (n.track, format_spine_label(n.event.date()), n.event.clone()))
            .collect();

    view! {
        <div class="full">
            <div class="spine-line"></div>
            {nodes
                .into_iter()
                .enumerate()
                .map(|(i, (track, label, event))| view! {
                    <div class="spine-entry">
                        <span class="spine-label" style="white-space: pre-line">{label}</span>
                        <div class=format!("spine-dot {}", track.as_str())></div>
                        <NodeCard event=event track=track index=i selected=selected/>
                    </div>
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn NodeCard(
    event: DatedEvent,
    track: Track,
    index: usize,
    selected: RwSignal<Option<Selected>>,
) -> impl IntoView {
    let delay = format!("animation-delay: {:.2}s", index as f64 * 0.08);
    let has_embed = event.embed.is_some();
    let open = {
        let event = event.clone();
        move |_| {
            selected.set(Some(Selected {
                track,
                event: event.clone(),
            }))
        }
    };

    view! {
        <div class=format!("node-card {}", track.as_str()) style=delay on:click=open>
            <span class="date-badge">{event.date.unwrap_or_default()}</span>
            <h4 class="node-label">{event.label}</h4>
            <p class="node-content">{event.content}</p>
            {has_embed.then(|| view! { <span class="embed-hint">"Primary source"</span> })}
        </div>
    }
}
