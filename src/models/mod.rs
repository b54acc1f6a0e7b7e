pub mod comment;
pub mod feed_event;
pub mod reaction;
pub mod user;

pub use comment::Comment;
pub use feed_event::{FeedEvent, FeedEventKind};
pub use reaction::Reaction;
pub use user::User;

/// Entity collection names in the realtime store
pub mod entity {
    pub const REACTIONS: &str = "reactions";
    pub const COMMENTS: &str = "comments";
    pub const FEED: &str = "feed";
}
