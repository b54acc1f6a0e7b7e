//! # Photo API
//!
//! A small read-only client for the external photo listing service.
//!
//! The service exposes paginated photo listings and single-photo lookups,
//! authenticated with a static client credential header. This crate owns the
//! wire models and the HTTP plumbing; it holds no state beyond the
//! configured client.

pub mod models;
pub mod service;

pub use models::{Photo, PhotoAuthor, PhotoLinks, PhotoUrls, ProfileImage};
pub use service::{PhotoApiClient, PhotoApiError};
