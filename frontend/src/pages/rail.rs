use leptos::prelude::*;
use pulse_core::viewport::rail_progress;
use pulse_core::{VibeStyle, format_anchor_date};

use crate::app::section_id;
use crate::types::Chapter;

const IDLE_CONNECTOR: &str = "#e7e5e4";

/// Inline style of a rail dot; the active dot is filled with its ring colour.
fn dot_style(style: &VibeStyle, on: bool) -> String {
    let fill = if on { style.ring } else { "white" };
    let scale = if on { "1.3" } else { "1" };
    format!(
        "--ring:{ring};border-color:{ring};background-color:{fill};transform:scale({scale})",
        ring = style.ring
    )
}

/// Fixed chapter rail. Dots up to the active chapter take their vibe
/// colour; the bar underneath shows overall progress.
#[component]
pub fn PulseRail(chapters: Vec<Chapter>, active: RwSignal<u32>) -> impl IntoView {
    let expanded = RwSignal::new(false);
    let total = chapters.len();

    let entries = chapters
        .into_iter()
        .enumerate()
        .map(|(i, chapter)| {
            let n = chapter.chapter_number;
            let style = chapter.style();
            let anchor = chapter
                .anchor_date
                .as_deref()
                .map(format_anchor_date)
                .unwrap_or_default();

            view! {
                <div class="rail-entry">
                    {(i > 0).then(move || view! {
                        <div
                            class="rail-connector"
                            style=move || {
                                let colour = if n <= active.get() { style.ring } else { IDLE_CONNECTOR };
                                format!("background-color:{colour}")
                            }
                        ></div>
                    })}
                    <a href=format!("#{}", section_id(n)) class="rail-link" on:click=move |_| expanded.set(false)>
                        <div
                            class="rail-dot"
                            class:active=move || active.get() == n
                            style=move || dot_style(style, active.get() == n)
                        ></div>
                        <div class="rail-label">
                            <p style=format!("color:{}", style.text)>"Ch. " {n}</p>
                            <p class="rail-anchor">{anchor}</p>
                            <p class="rail-title">{chapter.title}</p>
                        </div>
                    </a>
                </div>
            }
        })
        .collect_view();

    view! {
        <div>
            <button
                class="rail-toggle"
                aria-label="Toggle timeline"
                on:click=move |_| expanded.update(|e| *e = !*e)
            >
                "⋮"
            </button>
            <nav class=move || if expanded.get() { "pulse-rail expanded" } else { "pulse-rail" }>
                <div class="rail-heading">
                    <p>"Pulse"</p>
                    <p>"Timeline"</p>
                </div>
                <div class="rail-entries">{entries}</div>
                <div class="rail-progress">
                    <div class="rail-progress-track">
                        <div
                            class="rail-progress-fill"
                            style=move || format!("width:{}%", rail_progress(active.get(), total))
                        ></div>
                    </div>
                    <p>{move || format!("{}/{}", active.get(), total)}</p>
                </div>
            </nav>
        </div>
    }
}
