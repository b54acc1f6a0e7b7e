use crate::models::FeedEvent;

/// Sort feed entries most-recent-first.
///
/// The backend guarantees no delivery order, so this runs on every snapshot.
/// Ties on the timestamp break on the id to keep re-renders stable.
pub fn sort_feed_events(mut events: Vec<FeedEvent>) -> Vec<FeedEvent> {
    events.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    events
}

/// Coarse "time ago" label for feed entries and comments
pub fn format_relative(ts_ms: i64, now_ms: i64) -> String {
    let delta_secs = (now_ms - ts_ms).max(0) / 1000;

    match delta_secs {
        0..=59 => "just now".to_string(),
        60..=3_599 => format!("{}m ago", delta_secs / 60),
        3_600..=86_399 => format!("{}h ago", delta_secs / 3_600),
        _ => format!("{}d ago", delta_secs / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    #[test]
    fn test_sort_is_most_recent_first() {
        let user = User::generate();
        let old = FeedEvent::for_reaction("a", "❤️", &user, 100);
        let newer = FeedEvent::for_comment("b", "hi", &user, 200);
        let newest = FeedEvent::for_reaction("c", "🔥", &user, 300);

        let sorted = sort_feed_events(vec![old.clone(), newest.clone(), newer.clone()]);
        let ids: Vec<&str> = sorted.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![&newest.id, &newer.id, &old.id]);
    }

    #[test]
    fn test_sort_breaks_timestamp_ties_deterministically() {
        let user = User::generate();
        let a = FeedEvent::for_reaction("a", "❤️", &user, 100);
        let b = FeedEvent::for_reaction("b", "🔥", &user, 100);

        let first = sort_feed_events(vec![a.clone(), b.clone()]);
        let second = sort_feed_events(vec![b, a]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_relative_labels() {
        assert_eq!(format_relative(1_000, 30_000), "just now");
        assert_eq!(format_relative(0, 5 * 60 * 1000), "5m ago");
        assert_eq!(format_relative(0, 3 * 3_600 * 1000), "3h ago");
        assert_eq!(format_relative(0, 2 * 86_400 * 1000), "2d ago");
        // A clock skewed into the future never panics or renders negatives.
        assert_eq!(format_relative(10_000, 0), "just now");
    }
}
