pub mod feed;
pub mod gallery;
pub mod interactions;
