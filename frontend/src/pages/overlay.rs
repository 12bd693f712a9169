use leptos::ev;
use leptos::prelude::*;

use crate::types::Selected;

fn body_overflow(open: bool) -> &'static str {
    if open { "hidden" } else { "" }
}

/// Full-screen detail view of the selected node. Backdrop click, the close
/// button and Escape all dismiss it.
#[component]
pub fn NodeOverlay(selected: RwSignal<Option<Selected>>) -> impl IntoView {
    let _escape = window_event_listener(ev::keydown, move |e| {
        if e.key() == "Escape" {
            selected.set(None);
        }
    });

    // page behind the overlay stays put while it is open
    Effect::new(move |_| {
        let overflow = body_overflow(selected.with(Option::is_some));
        if let Some(body) = document().body() {
            let _ = body.style().set_property("overflow", overflow);
        }
    });

    move || {
        selected.get().map(|Selected { track, event }| {
            let source = event.embed.map(|embed| {
                let caption = match embed.tweet_id() {
                    Some(id) => format!("Post {id}"),
                    None => embed.kind.clone(),
                };
                view! {
                    <div class="overlay-source">
                        <p class="overlay-source-title">"Primary Source"</p>
                        <a href=embed.url target="_blank" rel="noopener noreferrer">{caption}</a>
                    </div>
                }
            });

            view! {
                <div class="overlay-backdrop" on:click=move |_| selected.set(None)>
                    <div
                        class=format!("overlay-card {}", track.as_str())
                        on:click=|e| e.stop_propagation()
                    >
                        <div class="overlay-header">
                            <div>
                                <span class="overlay-date">{event.date.unwrap_or_default()}</span>
                                <h3>{event.label}</h3>
                            </div>
                            <button
                                class="overlay-close"
                                aria-label="Close"
                                on:click=move |_| selected.set(None)
                            >
                                "×"
                            </button>
                        </div>
                        <p class="overlay-content">{event.content}</p>
                        {source}
                    </div>
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_scroll_locked_only_while_open() {
        assert_eq!(body_overflow(true), "hidden");
        assert_eq!(body_overflow(false), "");
    }
}
