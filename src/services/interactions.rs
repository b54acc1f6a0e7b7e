use crate::error::AppError;
use crate::models::comment::MAX_COMMENT_LEN;
use crate::models::{entity, Comment, FeedEvent, Reaction, User};
use live_store::{LiveQuery, LiveStoreClient, TxBatch, TxOp};

/// What a reaction toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// First reaction by this user on this image
    Added,
    /// Same emoji again: the reaction was removed
    Removed,
    /// Different emoji: the old reaction was replaced
    Replaced,
}

/// Live query for all reactions on one image
pub fn reactions_query(image_id: &str) -> LiveQuery {
    LiveQuery::entity(entity::REACTIONS).where_eq("imageId", image_id)
}

/// Live query for all comments on one image
pub fn comments_query(image_id: &str) -> LiveQuery {
    LiveQuery::entity(entity::COMMENTS).where_eq("imageId", image_id)
}

/// Live query for the full activity feed
pub fn feed_query() -> LiveQuery {
    LiveQuery::entity(entity::FEED)
}

/// The current user's reaction on an image, if any.
/// By the toggle protocol there is at most one.
pub fn find_user_reaction<'a>(reactions: &'a [Reaction], user_id: &str) -> Option<&'a Reaction> {
    reactions.iter().find(|r| r.user_id == user_id)
}

/// Reaction counts per emoji, in first-seen order
pub fn group_reactions(reactions: &[Reaction]) -> Vec<(String, usize)> {
    let mut groups: Vec<(String, usize)> = Vec::new();
    for reaction in reactions {
        match groups.iter_mut().find(|(emoji, _)| emoji == &reaction.emoji) {
            Some((_, count)) => *count += 1,
            None => groups.push((reaction.emoji.clone(), 1)),
        }
    }
    groups
}

pub fn total_interactions(reactions: &[Reaction], comments: &[Comment]) -> usize {
    reactions.len() + comments.len()
}

/// Build the atomic write batch for one reaction toggle.
///
/// Decision table:
/// - no existing reaction: create, plus a feed event
/// - same emoji: delete only, no feed event
/// - different emoji: delete old + create new in the same batch, plus a
///   feed event; observers never see zero or two reactions in between
///
/// The feed event for an earlier reaction is never deleted; the feed is an
/// append-only action log.
pub fn build_toggle_batch(
    image_id: &str,
    emoji: &str,
    user: &User,
    existing: Option<&Reaction>,
    now_ms: i64,
) -> (TxBatch, ToggleOutcome) {
    let mut batch = TxBatch::new();

    let outcome = match existing {
        Some(current) if current.emoji == emoji => {
            batch.push(TxOp::delete(entity::REACTIONS, &current.id));
            ToggleOutcome::Removed
        }
        Some(current) => {
            batch.push(TxOp::delete(entity::REACTIONS, &current.id));
            let replacement = Reaction::new(image_id, emoji, user, now_ms);
            batch.push(TxOp::create(
                entity::REACTIONS,
                replacement.id.clone(),
                replacement.to_attrs(),
            ));
            ToggleOutcome::Replaced
        }
        None => {
            let reaction = Reaction::new(image_id, emoji, user, now_ms);
            batch.push(TxOp::create(
                entity::REACTIONS,
                reaction.id.clone(),
                reaction.to_attrs(),
            ));
            ToggleOutcome::Added
        }
    };

    // Feed entry only when adding or changing, never when removing
    if outcome != ToggleOutcome::Removed {
        let event = FeedEvent::for_reaction(image_id, emoji, user, now_ms);
        batch.push(TxOp::create(entity::FEED, event.id.clone(), event.to_attrs()));
    }

    (batch, outcome)
}

/// Toggle the current user's reaction on an image.
///
/// `existing` is the user's reaction as currently observed through the live
/// subscription. The write is submitted as one atomic batch; the UI does not
/// apply any optimistic mutation and reconciles from the next snapshot push.
pub async fn toggle_reaction(
    store: &LiveStoreClient,
    image_id: &str,
    emoji: &str,
    user: &User,
    existing: Option<&Reaction>,
) -> Result<ToggleOutcome, AppError> {
    if emoji.trim().is_empty() {
        return Err(AppError::Validation("Emoji must not be empty".to_string()));
    }
    user.validate()?;

    let now_ms = chrono::Utc::now().timestamp_millis();
    let (batch, outcome) = build_toggle_batch(image_id, emoji, user, existing, now_ms);

    store.transact(batch).await?;
    Ok(outcome)
}

/// Trim and bound raw comment input.
///
/// Whitespace-only input is a validation rejection; anything longer than the
/// limit is truncated here, before submission, counted in characters.
pub fn normalize_comment_text(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(
            "Comment text must not be empty".to_string(),
        ));
    }
    Ok(trimmed.chars().take(MAX_COMMENT_LEN).collect())
}

/// Build the atomic batch for one posted comment: the comment record plus
/// its feed event.
pub fn build_comment_batch(image_id: &str, text: &str, user: &User, now_ms: i64) -> TxBatch {
    let comment = Comment::new(image_id, text, user, now_ms);
    let event = FeedEvent::for_comment(image_id, text, user, now_ms);

    TxBatch::with_ops(vec![
        TxOp::create(entity::COMMENTS, comment.id.clone(), comment.to_attrs()),
        TxOp::create(entity::FEED, event.id.clone(), event.to_attrs()),
    ])
}

/// Post a comment. Returns the normalized text actually submitted so the
/// caller can clear the input on success only.
pub async fn post_comment(
    store: &LiveStoreClient,
    image_id: &str,
    raw_text: &str,
    user: &User,
) -> Result<String, AppError> {
    let text = normalize_comment_text(raw_text)?;
    user.validate()?;

    let now_ms = chrono::Utc::now().timestamp_millis();
    let batch = build_comment_batch(image_id, &text, user, now_ms);

    store.transact(batch).await?;
    Ok(text)
}

/// Only the author may delete a comment. This is an affordance check for the
/// UI, not a security boundary.
pub fn can_delete_comment(comment: &Comment, requester: &User) -> bool {
    comment.user_id == requester.id
}

/// Delete one comment. The comment's feed event stays in the log.
pub async fn delete_comment(
    store: &LiveStoreClient,
    comment: &Comment,
    requester: &User,
) -> Result<(), AppError> {
    if !can_delete_comment(comment, requester) {
        return Err(AppError::Validation(
            "Only the author may delete a comment".to_string(),
        ));
    }

    let batch = TxBatch::with_ops(vec![TxOp::delete(entity::COMMENTS, &comment.id)]);
    store.transact(batch).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_user() -> User {
        User::generate()
    }

    /// Minimal in-memory mirror of the reactions collection, applying
    /// batches the way the backend would
    struct ReactionMirror {
        records: HashMap<String, Reaction>,
        feed_events: usize,
    }

    impl ReactionMirror {
        fn new() -> Self {
            Self {
                records: HashMap::new(),
                feed_events: 0,
            }
        }

        fn apply(&mut self, batch: &TxBatch) {
            for op in &batch.ops {
                match op {
                    TxOp::Create { entity: e, id, attrs } if e == entity::REACTIONS => {
                        let mut record = attrs.clone();
                        record.insert("id".to_string(), serde_json::Value::String(id.clone()));
                        let reaction: Reaction =
                            serde_json::from_value(serde_json::Value::Object(record)).unwrap();
                        self.records.insert(id.clone(), reaction);
                    }
                    TxOp::Delete { entity: e, id } if e == entity::REACTIONS => {
                        self.records.remove(id);
                    }
                    TxOp::Create { entity: e, .. } if e == entity::FEED => {
                        self.feed_events += 1;
                    }
                    _ => {}
                }
            }
        }

        fn user_reactions(&self, image_id: &str, user_id: &str) -> Vec<&Reaction> {
            self.records
                .values()
                .filter(|r| r.image_id == image_id && r.user_id == user_id)
                .collect()
        }

        fn toggle(&mut self, image_id: &str, emoji: &str, user: &User) -> ToggleOutcome {
            let reactions: Vec<Reaction> = self.records.values().cloned().collect();
            let existing = find_user_reaction(&reactions, &user.id).cloned();
            let (batch, outcome) = build_toggle_batch(image_id, emoji, user, existing.as_ref(), 1);
            self.apply(&batch);
            outcome
        }
    }

    #[test]
    fn test_first_reaction_creates_with_feed_event() {
        let user = test_user();
        let (batch, outcome) = build_toggle_batch("img", "❤️", &user, None, 1);

        assert_eq!(outcome, ToggleOutcome::Added);
        assert_eq!(batch.len(), 2);
        assert!(matches!(&batch.ops[0], TxOp::Create { entity: e, .. } if e == entity::REACTIONS));
        assert!(matches!(&batch.ops[1], TxOp::Create { entity: e, .. } if e == entity::FEED));
    }

    #[test]
    fn test_repeat_emoji_removes_without_feed_event() {
        let user = test_user();
        let existing = Reaction::new("img", "❤️", &user, 1);
        let (batch, outcome) = build_toggle_batch("img", "❤️", &user, Some(&existing), 2);

        assert_eq!(outcome, ToggleOutcome::Removed);
        assert_eq!(batch.len(), 1);
        assert!(matches!(&batch.ops[0], TxOp::Delete { entity: e, id } if e == entity::REACTIONS && id == &existing.id));
    }

    #[test]
    fn test_replace_is_one_atomic_batch() {
        // Delete + create + feed event all travel in one batch, so no
        // observer can see zero or two reactions for the user in between.
        let user = test_user();
        let existing = Reaction::new("img", "❤️", &user, 1);
        let (batch, outcome) = build_toggle_batch("img", "🔥", &user, Some(&existing), 2);

        assert_eq!(outcome, ToggleOutcome::Replaced);
        assert_eq!(batch.len(), 3);
        assert!(matches!(&batch.ops[0], TxOp::Delete { id, .. } if id == &existing.id));
        assert!(matches!(&batch.ops[1], TxOp::Create { entity: e, .. } if e == entity::REACTIONS));
        assert!(matches!(&batch.ops[2], TxOp::Create { entity: e, .. } if e == entity::FEED));
    }

    #[test]
    fn test_toggle_sequences_keep_at_most_one_reaction() {
        let user = test_user();
        let mut mirror = ReactionMirror::new();

        for (emoji, expected_len) in [
            ("❤️", 1), // add
            ("🔥", 1), // replace
            ("🔥", 0), // remove (same emoji repeated)
            ("🎉", 1), // add again
            ("🎉", 0), // remove
        ] {
            mirror.toggle("img", emoji, &user);
            let live = mirror.user_reactions("img", &user.id);
            assert_eq!(live.len(), expected_len, "after toggling {}", emoji);
            assert!(live.len() <= 1);
        }
    }

    #[test]
    fn test_heart_then_fire_scenario() {
        // ❤️ then 🔥: one reaction record remains (🔥) and two feed events
        // exist; the original ❤️ event is never deleted.
        let user = test_user();
        let mut mirror = ReactionMirror::new();

        mirror.toggle("imgX", "❤️", &user);
        mirror.toggle("imgX", "🔥", &user);

        let live = mirror.user_reactions("imgX", &user.id);
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].emoji, "🔥");
        assert_eq!(mirror.feed_events, 2);
    }

    #[test]
    fn test_group_reactions_first_seen_order() {
        let a = test_user();
        let b = test_user();
        let reactions = vec![
            Reaction::new("img", "🔥", &a, 1),
            Reaction::new("img", "❤️", &b, 2),
            Reaction::new("img", "🔥", &b, 3),
        ];

        let groups = group_reactions(&reactions);
        assert_eq!(groups, vec![("🔥".to_string(), 2), ("❤️".to_string(), 1)]);
    }

    #[test]
    fn test_find_user_reaction() {
        let a = test_user();
        let b = test_user();
        let reactions = vec![
            Reaction::new("img", "🔥", &a, 1),
            Reaction::new("img", "❤️", &b, 2),
        ];

        assert_eq!(find_user_reaction(&reactions, &b.id).unwrap().emoji, "❤️");
        assert!(find_user_reaction(&reactions, "nobody").is_none());
    }

    #[test]
    fn test_comment_text_boundary() {
        let at_limit = "x".repeat(MAX_COMMENT_LEN);
        assert_eq!(normalize_comment_text(&at_limit).unwrap().chars().count(), 500);

        // One character over the limit is truncated before submission.
        let over_limit = "x".repeat(MAX_COMMENT_LEN + 1);
        assert_eq!(normalize_comment_text(&over_limit).unwrap().chars().count(), 500);

        assert!(normalize_comment_text("   \n  ").is_err());
    }

    #[test]
    fn test_comment_batch_pairs_record_and_feed_event() {
        let user = test_user();
        let batch = build_comment_batch("img", "nice shot", &user, 7);

        assert_eq!(batch.len(), 2);
        assert!(matches!(&batch.ops[0], TxOp::Create { entity: e, .. } if e == entity::COMMENTS));
        assert!(matches!(&batch.ops[1], TxOp::Create { entity: e, .. } if e == entity::FEED));
    }

    #[test]
    fn test_only_author_may_delete() {
        let author = test_user();
        let other = test_user();
        let comment = Comment::new("img", "mine", &author, 1);

        assert!(can_delete_comment(&comment, &author));
        assert!(!can_delete_comment(&comment, &other));
    }

    #[tokio::test]
    async fn test_toggle_rejects_empty_emoji_before_any_network() {
        // Unroutable endpoint: the validation rejection must fire first.
        let store = LiveStoreClient::new("http://127.0.0.1:1", "app").unwrap();
        let user = test_user();
        let result = toggle_reaction(&store, "img", "  ", &user, None).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
