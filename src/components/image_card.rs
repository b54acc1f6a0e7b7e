use crate::components::{EmojiBar, ImageModal};
use crate::HighlightedCard;
use dioxus::prelude::*;
use photo_api::Photo;

#[component]
pub fn ImageCard(photo: Photo) -> Element {
    let mut show_modal = use_signal(|| false);
    let highlighted = use_context::<HighlightedCard>();

    // Transient ring applied when the activity feed jumps to this card
    let is_highlighted = highlighted.0.read().as_deref() == Some(photo.id.as_str());

    let description = photo.description().to_string();
    let author_location = photo.user.location.clone().unwrap_or_default();

    rsx! {
        div {
            id: "photo-card-{photo.id}",
            class: if is_highlighted { "photo-card highlighted" } else { "photo-card" },
            onclick: move |_| show_modal.set(true),

            div { class: "photo-image",
                img {
                    src: "{photo.urls.small}",
                    alt: "{description}",
                    loading: "lazy",
                }

                div { class: "photo-author-overlay",
                    div { class: "photo-author-badge", "👤" }
                    div { class: "photo-author-text",
                        p { class: "photo-author-name", "{photo.user.name}" }
                        if !author_location.is_empty() {
                            p { class: "photo-author-location", "{author_location}" }
                        }
                    }
                }
            }

            div { class: "photo-content",
                h3 { class: "photo-title", "{description}" }

                // Reactions must not open the modal
                div {
                    class: "photo-reactions",
                    onclick: move |e| e.stop_propagation(),
                    EmojiBar { image_id: photo.id.clone(), compact: true }
                }
            }
        }

        // Modal mounts lazily, and with it the detail subscriptions
        if show_modal() {
            ImageModal {
                photo: photo.clone(),
                on_close: move |_| show_modal.set(false),
            }
        }
    }
}
