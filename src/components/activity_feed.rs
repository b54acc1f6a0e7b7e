use crate::hooks::use_live_records;
use crate::models::{FeedEvent, FeedEventKind};
use crate::services::{feed, interactions};
use dioxus::prelude::*;

#[component]
pub fn ActivityFeed(on_jump: EventHandler<String>) -> Element {
    let events = use_live_records::<FeedEvent>(interactions::feed_query());

    // Delivery order is not trusted; re-sort on every snapshot.
    let sorted = feed::sort_feed_events(events());
    let total = sorted.len();
    let now_ms = chrono::Utc::now().timestamp_millis();

    rsx! {
        div { class: "activity-feed",
            div { class: "activity-feed-header",
                div { class: "activity-feed-title",
                    span { class: "activity-feed-icon", "⚡" }
                    div {
                        h3 { "Live Activity Feed" }
                        p { "Real-time updates from all users" }
                    }
                }
                div { class: "activity-feed-stats",
                    span { class: "live-dot" }
                    span { "{total} activities" }
                }
            }

            div { class: "activity-feed-list",
                if sorted.is_empty() {
                    div { class: "activity-feed-empty",
                        p { "No activities yet" }
                        p { class: "activity-feed-hint", "Interact with images to see updates here" }
                    }
                } else {
                    for event in sorted {
                        FeedEntry {
                            key: "{event.id}",
                            event: event.clone(),
                            now_ms,
                            on_jump,
                        }
                    }
                }
            }

            div { class: "activity-feed-footer",
                "Live feed updates with every interaction"
            }
        }
    }
}

#[component]
fn FeedEntry(event: FeedEvent, now_ms: i64, on_jump: EventHandler<String>) -> Element {
    let when = feed::format_relative(event.created_at, now_ms);
    let initial = event
        .user_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "U".to_string());

    let action = match event.kind {
        FeedEventKind::Reaction => format!("reacted {}", event.emoji.as_deref().unwrap_or("")),
        FeedEventKind::Comment => "commented".to_string(),
    };
    let kind_icon = match event.kind {
        FeedEventKind::Reaction => "💗",
        FeedEventKind::Comment => "💬",
    };

    let comment_text = event.text.clone().unwrap_or_default();
    let trailing_emoji = event.emoji.clone().unwrap_or_default();
    let image_id = event.image_id.clone();

    rsx! {
        div {
            class: "feed-entry",
            onclick: move |_| on_jump.call(image_id.clone()),

            div {
                class: "avatar-badge",
                style: "background: {event.user_color};",
                "{initial}"
            }

            div { class: "feed-entry-body",
                div { class: "feed-entry-meta",
                    span { class: "feed-entry-kind", "{kind_icon}" }
                    span { class: "feed-entry-author", "{event.user_name}" }
                    span { class: "feed-entry-action", "{action}" }
                }

                if !comment_text.is_empty() {
                    p { class: "feed-entry-text", "{comment_text}" }
                }

                div { class: "feed-entry-footer",
                    span { class: "feed-entry-when", "🕐 {when}" }
                    if event.kind == FeedEventKind::Reaction {
                        span { class: "feed-entry-emoji", "{trailing_emoji}" }
                    }
                }
            }
        }
    }
}
