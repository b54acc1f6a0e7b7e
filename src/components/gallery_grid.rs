use crate::components::ImageCard;
use crate::error::AppError;
use crate::services::gallery::{self, GalleryPager, GalleryPhase, CATEGORIES};
use dioxus::prelude::*;
use photo_api::PhotoApiClient;
use std::collections::HashMap;

#[component]
pub fn GalleryGrid() -> Element {
    let photo_client = use_context::<PhotoApiClient>();

    let mut pager = use_signal(|| GalleryPager::new("latest"));
    let mut phase = use_signal(|| GalleryPhase::Loading);
    // Per-category page cache, so switching away and back within the
    // freshness window avoids a re-fetch
    let mut cache = use_signal(HashMap::<String, GalleryPager>::new);
    // Category whose fetch is currently in flight, if any. Doubles as the
    // fence against stale responses after a category switch.
    let mut in_flight = use_signal(|| None::<String>);

    let fetch_next = use_callback(move |_: ()| {
        let current = pager.read().category().to_string();
        if in_flight().as_deref() == Some(current.as_str()) {
            return;
        }
        let Some(page) = pager.read().next_page_number() else {
            return;
        };

        let client = photo_client.clone();
        in_flight.set(Some(current.clone()));

        spawn(async move {
            let result = gallery::fetch_page_with_retry(&client, page).await;

            // A category switch may have replaced the pager while this
            // request was in flight; a stale response must not touch it.
            let still_current = pager.read().category() == current;
            if still_current {
                match result {
                    Ok(photos) => {
                        let now_ms = chrono::Utc::now().timestamp_millis();
                        pager.write().record_page(&photos, now_ms);
                        let empty = pager.read().is_exhausted_and_empty();
                        phase.set(if empty {
                            GalleryPhase::Empty
                        } else {
                            GalleryPhase::Ready
                        });
                    }
                    Err(e) => {
                        log::error!("Gallery page fetch failed: {}", e);
                        phase.set(GalleryPhase::Error(AppError::from(e).user_message()));
                    }
                }
            } else {
                log::debug!("Discarding stale page response for '{}'", current);
            }

            if in_flight().as_deref() == Some(current.as_str()) {
                in_flight.set(None);
            }
        });
    });

    let select_category = use_callback(move |next: String| {
        if pager.read().category() == next {
            return;
        }

        let now_ms = chrono::Utc::now().timestamp_millis();
        let previous = pager();
        cache.write().insert(previous.category().to_string(), previous);

        let cached = cache.write().remove(&next);
        match cached {
            Some(entry) if entry.is_fresh(now_ms) => {
                let empty = entry.is_exhausted_and_empty();
                pager.set(entry);
                phase.set(if empty {
                    GalleryPhase::Empty
                } else {
                    GalleryPhase::Ready
                });
            }
            _ => {
                pager.set(GalleryPager::new(next));
                phase.set(GalleryPhase::Loading);
                fetch_next.call(());
            }
        }
    });

    // First page on mount; later pages are requested by the sentinel
    use_hook(move || fetch_next.call(()));

    let current_category = pager.read().category().to_string();
    let photos = pager.read().photos();
    let fetching = in_flight().is_some();
    let has_next = pager.read().has_next_page();
    let current_phase = phase();

    rsx! {
        div { class: "gallery",
            // Header with category chips
            div { class: "gallery-header",
                div {
                    h1 { "✨ Image Gallery" }
                    p { "Interactions with beautiful images" }
                }
                div { class: "gallery-chips",
                    for category in CATEGORIES.iter() {
                        button {
                            key: "{category}",
                            class: if *category == current_category { "chip active" } else { "chip" },
                            onclick: move |_| select_category.call(category.to_string()),
                            "{category}"
                        }
                    }
                }
            }

            match current_phase {
                GalleryPhase::Loading => rsx! {
                    div { class: "gallery-state",
                        div { class: "spinner" }
                    }
                },
                GalleryPhase::Error(message) => rsx! {
                    // Error replaces all content; stale pages never render
                    // next to an error banner.
                    div { class: "gallery-state",
                        div { class: "error-panel",
                            span { class: "error-icon", "⚠️" }
                            h3 { "Failed to load gallery" }
                            p { "{message}" }
                        }
                    }
                },
                GalleryPhase::Empty => rsx! {
                    div { class: "gallery-state",
                        p { class: "gallery-empty", "No images found." }
                    }
                },
                GalleryPhase::Ready => rsx! {
                    div { class: "gallery-grid",
                        for photo in photos {
                            ImageCard { key: "{photo.id}", photo: photo.clone() }
                        }
                    }

                    // Load-more sentinel: the next page is requested only
                    // when this enters the viewport, a further page exists
                    // and no fetch is already running.
                    div {
                        class: "load-more",
                        onvisible: move |evt| {
                            if let Ok(visible) = evt.data().is_intersecting() {
                                if visible {
                                    fetch_next.call(());
                                }
                            }
                        },
                        if fetching {
                            div { class: "spinner spinner-small" }
                        } else if has_next {
                            p { "Scroll to load more" }
                        } else {
                            p { class: "gallery-end", "You've reached the end 🎉" }
                        }
                    }
                },
            }
        }
    }
}
