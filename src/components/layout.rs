use crate::components::{ActivityFeed, GalleryGrid, UserProfile};
use crate::hooks::use_user_store;
use crate::{HighlightedCard, Tab};
use dioxus::prelude::*;
use std::time::Duration;

/// Width below which the layout switches to the mobile shell
const MOBILE_BREAKPOINT: f64 = 1024.0;
/// How long a jumped-to card keeps its highlight ring
const HIGHLIGHT_MS: u64 = 2_000;

#[component]
pub fn AppLayout() -> Element {
    let user_store = use_user_store();
    let mut active_tab = use_signal(|| Tab::Gallery);
    let mut is_mobile = use_signal(|| false);
    let mut sidebar_open = use_signal(|| false);
    let highlighted = use_context::<HighlightedCard>();

    let user = user_store.read().user().clone();

    // Jump from a feed entry to its source card: switch to the gallery,
    // scroll the card into view and highlight it for a fixed two seconds.
    let jump_to_card = use_callback(move |image_id: String| {
        active_tab.set(Tab::Gallery);
        sidebar_open.set(false);

        let mut signal = highlighted.0;
        signal.set(Some(image_id.clone()));

        spawn(async move {
            // Give the gallery a beat to render before scrolling
            tokio::time::sleep(Duration::from_millis(150)).await;
            let js = format!(
                "document.getElementById('photo-card-{}')?.scrollIntoView({{behavior: 'smooth', block: 'center'}});",
                image_id
            );
            let _ = document::eval(&js);

            tokio::time::sleep(Duration::from_millis(HIGHLIGHT_MS - 150)).await;
            // Only clear if no later jump replaced the highlight
            if signal.read().as_deref() == Some(image_id.as_str()) {
                signal.set(None);
            }
        });
    });

    let mobile = is_mobile();
    let drawer_open = sidebar_open();

    rsx! {
        div {
            class: "app-shell",
            onresize: move |evt| {
                if let Ok(size) = evt.data().get_content_box_size() {
                    is_mobile.set(size.width < MOBILE_BREAKPOINT);
                }
            },

            // Mobile header
            if mobile {
                header { class: "mobile-header",
                    button {
                        class: "mobile-menu-toggle",
                        onclick: move |_| sidebar_open.set(!sidebar_open()),
                        if drawer_open { "✕" } else { "☰" }
                    }
                    div { class: "brand",
                        span { class: "brand-icon", "🖼" }
                        span { class: "brand-name", "ImageSync" }
                    }
                    div {
                        class: "avatar-badge",
                        style: "background: {user.color};",
                        "{user.initial()}"
                    }
                }
            }

            // Sidebar (desktop) / drawer (mobile)
            aside {
                class: if mobile && !drawer_open { "sidebar sidebar-closed" } else { "sidebar" },
                div { class: "sidebar-inner",
                    div { class: "brand",
                        span { class: "brand-icon", "🖼" }
                        h1 { class: "brand-name", "ImageSync" }
                    }

                    nav { class: "sidebar-nav",
                        TabButton {
                            label: "Gallery",
                            icon: "🖼",
                            active: active_tab() == Tab::Gallery,
                            on_select: move |_| {
                                active_tab.set(Tab::Gallery);
                                sidebar_open.set(false);
                            },
                        }
                        TabButton {
                            label: "Live Feed",
                            icon: "⚡",
                            active: active_tab() == Tab::Feed,
                            on_select: move |_| {
                                active_tab.set(Tab::Feed);
                                sidebar_open.set(false);
                            },
                        }
                    }

                    div { class: "sidebar-profile",
                        UserProfile {}
                    }
                }
            }

            // Main content
            main {
                class: if mobile { "main-content main-content-mobile" } else { "main-content" },
                match active_tab() {
                    Tab::Gallery => rsx! {
                        GalleryGrid {}
                    },
                    Tab::Feed => rsx! {
                        ActivityFeed { on_jump: move |image_id| jump_to_card.call(image_id) }
                    },
                }
            }

            // Mobile bottom navigation
            if mobile {
                nav { class: "bottom-nav",
                    TabButton {
                        label: "Gallery",
                        icon: "🖼",
                        active: active_tab() == Tab::Gallery,
                        on_select: move |_| active_tab.set(Tab::Gallery),
                    }
                    TabButton {
                        label: "Live Feed",
                        icon: "⚡",
                        active: active_tab() == Tab::Feed,
                        on_select: move |_| active_tab.set(Tab::Feed),
                    }
                }
            }

            // Backdrop behind the open drawer
            if mobile && drawer_open {
                div {
                    class: "drawer-overlay",
                    onclick: move |_| sidebar_open.set(false),
                }
            }
        }
    }
}

#[component]
fn TabButton(label: String, icon: String, active: bool, on_select: EventHandler<()>) -> Element {
    rsx! {
        button {
            class: if active { "tab-button active" } else { "tab-button" },
            onclick: move |_| on_select.call(()),
            span { class: "tab-button-icon", "{icon}" }
            span { class: "tab-button-label", "{label}" }
        }
    }
}
