use crate::hooks::{use_live_records, use_user_store};
use crate::models::comment::MAX_COMMENT_LEN;
use crate::models::Comment;
use crate::services::{feed, interactions};
use dioxus::prelude::*;
use live_store::LiveStoreClient;

#[component]
pub fn CommentBox(image_id: String) -> Element {
    let store = use_context::<LiveStoreClient>();
    let user_store = use_user_store();
    let mut text = use_signal(String::new);
    let mut posting = use_signal(|| false);

    let comments = use_live_records::<Comment>(interactions::comments_query(&image_id));

    let mut sorted = comments();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

    let user = user_store.read().user().clone();
    let now_ms = chrono::Utc::now().timestamp_millis();

    let submit = use_callback(move |_: ()| {
        if posting() {
            return;
        }
        let raw = text();
        if raw.trim().is_empty() {
            return;
        }

        let store = store.clone();
        let image_id = image_id.clone();
        let user = user_store.read().user().clone();

        posting.set(true);
        spawn(async move {
            match interactions::post_comment(&store, &image_id, &raw, &user).await {
                // Clear the input on success only; a failed post keeps the
                // draft so the user can retry.
                Ok(_) => text.set(String::new()),
                Err(e) => log::error!("Comment post failed: {}", e),
            }
            posting.set(false);
        });
    });

    let can_submit = !text().trim().is_empty() && !posting();
    let char_count = text().chars().count();

    rsx! {
        div { class: "comment-box",
            // Input row
            div { class: "comment-input-row",
                div {
                    class: "avatar-badge",
                    style: "background: {user.color};",
                    "{user.initial()}"
                }
                div { class: "comment-input-main",
                    textarea {
                        class: "comment-input",
                        placeholder: "Add a comment...",
                        rows: "3",
                        maxlength: "{MAX_COMMENT_LEN}",
                        value: "{text}",
                        oninput: move |e| {
                            // Bound at input time, counted in characters
                            let value: String = e.value().chars().take(MAX_COMMENT_LEN).collect();
                            text.set(value);
                        },
                        onkeydown: move |e| {
                            if e.key() == Key::Enter && !e.modifiers().contains(Modifiers::SHIFT) {
                                e.prevent_default();
                                submit.call(());
                            }
                        },
                    }
                    div { class: "comment-input-footer",
                        span { class: "comment-char-count", "{char_count}/{MAX_COMMENT_LEN}" }
                        button {
                            class: "btn-primary",
                            disabled: !can_submit,
                            onclick: move |_| submit.call(()),
                            "Post"
                        }
                    }
                }
            }

            // Comment list, most recent first
            if sorted.is_empty() {
                p { class: "comment-empty", "No comments yet. Be the first to comment!" }
            } else {
                div { class: "comment-list",
                    for comment in sorted {
                        CommentRow { key: "{comment.id}", comment: comment.clone(), now_ms }
                    }
                }
            }
        }
    }
}

#[component]
fn CommentRow(comment: Comment, now_ms: i64) -> Element {
    let store = use_context::<LiveStoreClient>();
    let user_store = use_user_store();

    let user = user_store.read().user().clone();
    let own = interactions::can_delete_comment(&comment, &user);
    let when = feed::format_relative(comment.created_at, now_ms);
    let initial = comment
        .user_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "U".to_string());

    let delete_target = comment.clone();

    rsx! {
        div { class: "comment-row",
            div {
                class: "avatar-badge",
                style: "background: {comment.user_color};",
                "{initial}"
            }
            div { class: "comment-body",
                div { class: "comment-meta",
                    span { class: "comment-author", "{comment.user_name}" }
                    span { class: "comment-when", "{when}" }
                    // Delete is an affordance for the author only
                    if own {
                        button {
                            class: "comment-delete",
                            title: "Delete comment",
                            onclick: move |_| {
                                let store = store.clone();
                                let comment = delete_target.clone();
                                let user = user_store.read().user().clone();
                                spawn(async move {
                                    if let Err(e) =
                                        interactions::delete_comment(&store, &comment, &user).await
                                    {
                                        log::error!("Comment delete failed: {}", e);
                                    }
                                });
                            },
                            "🗑"
                        }
                    }
                }
                p { class: "comment-text", "{comment.text}" }
            }
        }
    }
}
