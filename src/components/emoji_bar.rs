use crate::hooks::{use_live_records, use_user_store};
use crate::models::Reaction;
use crate::services::interactions;
use dioxus::prelude::*;
use live_store::LiveStoreClient;

/// Quick-access emojis, most used first
pub const QUICK_EMOJIS: &[(&str, &str)] = &[
    ("❤️", "Love"),
    ("🔥", "Fire"),
    ("👍", "Like"),
    ("🎉", "Celebrate"),
    ("😍", "Heart eyes"),
    ("😂", "Laughing"),
];

/// How many quick emojis the compact (card) variant shows
const COMPACT_EMOJIS: usize = 4;

#[component]
pub fn EmojiBar(image_id: String, compact: bool) -> Element {
    let user_store = use_user_store();
    let reactions = use_live_records::<Reaction>(interactions::reactions_query(&image_id));

    let all = reactions();
    let user_id = user_store.read().user().id.clone();
    let user_reaction = interactions::find_user_reaction(&all, &user_id).cloned();
    let groups = interactions::group_reactions(&all);

    let shown = if compact { COMPACT_EMOJIS } else { QUICK_EMOJIS.len() };
    let buttons: Vec<(String, String, bool, usize)> = QUICK_EMOJIS
        .iter()
        .take(shown)
        .map(|(emoji, label)| {
            let active = user_reaction
                .as_ref()
                .map(|r| r.emoji == *emoji)
                .unwrap_or(false);
            let count = groups
                .iter()
                .find(|(grouped, _)| grouped == emoji)
                .map(|(_, count)| *count)
                .unwrap_or(0);
            (emoji.to_string(), label.to_string(), active, count)
        })
        .collect();

    rsx! {
        div { class: if compact { "emoji-bar emoji-bar-compact" } else { "emoji-bar" },
            div { class: "emoji-row",
                for (emoji, label, active, count) in buttons {
                    ReactionButton {
                        key: "{emoji}",
                        emoji,
                        label,
                        active,
                        count,
                        compact,
                        image_id: image_id.clone(),
                        existing: user_reaction.clone(),
                    }
                }

                if compact {
                    // Total pill: every emoji present plus the overall count
                    div { class: "reaction-pill",
                        if all.is_empty() {
                            span { class: "reaction-pill-empty", "💬" }
                        } else {
                            for (emoji, _count) in groups.iter() {
                                span { class: "reaction-pill-emoji", "{emoji}" }
                            }
                        }
                        span { class: "reaction-pill-count", "{all.len()}" }
                    }
                }
            }

            // Per-emoji summary for the expanded (modal) variant
            if !compact && !groups.is_empty() {
                div { class: "reaction-summary",
                    for (emoji, count) in groups {
                        div { class: "reaction-summary-row",
                            span { class: "reaction-summary-emoji", "{emoji}" }
                            span { class: "reaction-summary-count", "{count}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ReactionButton(
    emoji: String,
    label: String,
    active: bool,
    count: usize,
    compact: bool,
    image_id: String,
    existing: Option<Reaction>,
) -> Element {
    let store = use_context::<LiveStoreClient>();
    let user_store = use_user_store();

    let display_emoji = emoji.clone();

    rsx! {
        button {
            class: if active { "reaction-button active" } else { "reaction-button" },
            title: "{label}",
            onclick: move |_| {
                let store = store.clone();
                let image_id = image_id.clone();
                let emoji = emoji.clone();
                let existing = existing.clone();
                let user = user_store.read().user().clone();

                // Fire-and-forget: the subscription push reconciles the UI,
                // a failed write leaves it untouched.
                spawn(async move {
                    if let Err(e) = interactions::toggle_reaction(
                        &store,
                        &image_id,
                        &emoji,
                        &user,
                        existing.as_ref(),
                    )
                    .await
                    {
                        log::error!("Reaction toggle failed: {}", e);
                    }
                });
            },
            span { class: "reaction-button-emoji", "{display_emoji}" }
            if !compact && count > 0 {
                span { class: "reaction-button-count", "{count}" }
            }
        }
    }
}
