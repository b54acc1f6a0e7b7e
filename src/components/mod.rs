mod activity_feed;
mod comment_box;
mod emoji_bar;
mod gallery_grid;
mod image_card;
mod image_modal;
mod layout;
mod user_profile;

pub use activity_feed::ActivityFeed;
pub use comment_box::CommentBox;
pub use emoji_bar::EmojiBar;
pub use gallery_grid::GalleryGrid;
pub use image_card::ImageCard;
pub use image_modal::ImageModal;
pub use layout::AppLayout;
pub use user_profile::UserProfile;
