use crate::components::{CommentBox, EmojiBar};
use crate::hooks::use_user_store;
use dioxus::prelude::*;
use photo_api::Photo;

#[component]
pub fn ImageModal(photo: Photo, on_close: EventHandler<()>) -> Element {
    let user_store = use_user_store();
    let user = user_store.read().user().clone();

    // Lock body scroll for the modal's lifetime
    use_hook(|| {
        let _ = document::eval("document.body.style.overflow = 'hidden';");
    });
    use_drop(|| {
        let _ = document::eval("document.body.style.overflow = '';");
    });

    let description = photo.description().to_string();
    let author_location = photo
        .user
        .location
        .clone()
        .unwrap_or_else(|| "Photographer".to_string());
    let full_url = photo
        .urls
        .full
        .clone()
        .unwrap_or_else(|| photo.urls.regular.clone());
    let html_link = photo.links.html.clone().unwrap_or_default();
    let download_link = photo.links.download.clone().unwrap_or_default();
    let author_image = photo
        .user
        .profile_image
        .as_ref()
        .map(|p| p.medium.clone())
        .unwrap_or_default();

    rsx! {
        div { class: "modal-overlay",
            div {
                class: "modal-backdrop",
                onclick: move |_| on_close.call(()),
            }

            div { class: "modal-content",
                header { class: "modal-header",
                    div { class: "modal-author",
                        div { class: "modal-author-avatar",
                            if author_image.is_empty() {
                                "📷"
                            } else {
                                img {
                                    src: "{author_image}",
                                    alt: "{photo.user.name}",
                                }
                            }
                        }
                        div {
                            h3 { "{photo.user.name}" }
                            p { "{author_location}" }
                        }
                    }
                    div { class: "modal-actions",
                        if !download_link.is_empty() {
                            a {
                                class: "modal-action",
                                href: "{download_link}",
                                target: "_blank",
                                rel: "noreferrer",
                                "⬇"
                            }
                        }
                        if !html_link.is_empty() {
                            a {
                                class: "modal-action",
                                href: "{html_link}",
                                target: "_blank",
                                rel: "noreferrer",
                                "🔗"
                            }
                        }
                        button {
                            class: "modal-action",
                            onclick: move |_| on_close.call(()),
                            "✕"
                        }
                    }
                }

                div { class: "modal-body",
                    div { class: "modal-image",
                        img {
                            src: "{full_url}",
                            alt: "{description}",
                            loading: "lazy",
                        }
                    }

                    aside { class: "modal-sidebar",
                        div { class: "modal-user-card",
                            div {
                                class: "avatar-badge",
                                style: "background: {user.color};",
                                "{user.initial()}"
                            }
                            div {
                                p { class: "modal-user-name", "{user.name}" }
                                p { class: "modal-user-hint", "Ready to interact" }
                            }
                        }

                        section { class: "modal-section",
                            h4 { "Reactions" }
                            EmojiBar { image_id: photo.id.clone(), compact: false }
                        }

                        section { class: "modal-section",
                            h4 { "Comments" }
                            CommentBox { image_id: photo.id.clone() }
                        }
                    }
                }
            }
        }
    }
}
