use photo_api::{Photo, PhotoApiClient, PhotoApiError};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

/// Items per listing page
pub const PAGE_SIZE: u32 = 12;
/// Automatic retries after a failed page fetch before surfacing an error
pub const MAX_RETRIES: u32 = 2;
/// How long a category's pages are served from cache after the last fetch
pub const CACHE_TTL_MS: i64 = 5 * 60 * 1000;
/// Base delay between retry attempts, scaled by the attempt number
const RETRY_DELAY_MS: u64 = 300;

/// Categories offered in the gallery header. The category is a cache key and
/// a UI affordance; the listing request itself does not vary by category.
pub const CATEGORIES: &[&str] = &["latest", "nature", "technology"];

/// View state of the gallery. Error is distinct from Loading and Empty and
/// never renders mixed with stale page content.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryPhase {
    Loading,
    Ready,
    Empty,
    Error(String),
}

/// Ordered, deduplicated photo collection built from successive pages.
///
/// Keyed by the photo's API id; the later copy wins for a repeated id while
/// the position of the first insertion is kept, so the visible sequence is
/// page order, then within-page order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoSet {
    order: Vec<String>,
    by_id: HashMap<String, Photo>,
}

impl PhotoSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_page(&mut self, page: &[Photo]) {
        for photo in page {
            if !self.by_id.contains_key(&photo.id) {
                self.order.push(photo.id.clone());
            }
            self.by_id.insert(photo.id.clone(), photo.clone());
        }
    }

    /// The visible sequence, in first-insertion order
    pub fn photos(&self) -> Vec<Photo> {
        self.order
            .iter()
            .filter_map(|id| self.by_id.get(id).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Pagination state for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryPager {
    category: String,
    photos: PhotoSet,
    pages_fetched: u32,
    last_page_len: Option<usize>,
    fetched_at_ms: i64,
}

impl GalleryPager {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            photos: PhotoSet::new(),
            pages_fetched: 0,
            last_page_len: None,
            fetched_at_ms: 0,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn photos(&self) -> Vec<Photo> {
        self.photos.photos()
    }

    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    /// Merge one fetched page and remember its size for the termination rule
    pub fn record_page(&mut self, page: &[Photo], now_ms: i64) {
        self.photos.merge_page(page);
        self.pages_fetched += 1;
        self.last_page_len = Some(page.len());
        self.fetched_at_ms = now_ms;
    }

    /// A further page is assumed to exist until a page comes back empty
    pub fn has_next_page(&self) -> bool {
        self.last_page_len.map_or(true, |len| len > 0)
    }

    /// The next page number to request, if any
    pub fn next_page_number(&self) -> Option<u32> {
        if self.has_next_page() {
            Some(self.pages_fetched + 1)
        } else {
            None
        }
    }

    /// True while the cached pages are younger than the freshness window
    pub fn is_fresh(&self, now_ms: i64) -> bool {
        self.pages_fetched > 0 && now_ms - self.fetched_at_ms < CACHE_TTL_MS
    }

    /// Loaded at least one page and found nothing
    pub fn is_exhausted_and_empty(&self) -> bool {
        self.pages_fetched > 0 && self.photos.is_empty() && !self.has_next_page()
    }
}

/// Run an async operation with bounded automatic retries.
///
/// The closure receives the attempt number (0-based). Failures short of the
/// retry budget are logged and waited out with a growing delay.
pub async fn with_retries<T, E, F, Fut>(max_retries: u32, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt: u32 = 0;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_retries => {
                attempt += 1;
                log::warn!("Fetch failed, retry {}/{}: {}", attempt, max_retries, e);
                tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Fetch one listing page, retrying up to [`MAX_RETRIES`] times before
/// surfacing the error to the caller
pub async fn fetch_page_with_retry(
    client: &PhotoApiClient,
    page: u32,
) -> Result<Vec<Photo>, PhotoApiError> {
    with_retries(MAX_RETRIES, |_| client.list_photos(page, PAGE_SIZE)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use photo_api::{PhotoAuthor, PhotoUrls};
    use std::cell::Cell;

    fn photo(id: &str) -> Photo {
        photo_with_description(id, "")
    }

    fn photo_with_description(id: &str, description: &str) -> Photo {
        Photo {
            id: id.to_string(),
            width: None,
            height: None,
            alt_description: Some(description.to_string()),
            urls: PhotoUrls {
                raw: None,
                full: None,
                regular: format!("https://i/{}-r", id),
                small: format!("https://i/{}-s", id),
                thumb: None,
            },
            user: PhotoAuthor {
                name: "Author".to_string(),
                location: None,
                profile_image: None,
            },
            links: Default::default(),
        }
    }

    #[test]
    fn test_dedup_law() {
        // [1,2] then [2,3] yields [1,2,3] with the second page's copy of 2.
        let mut set = PhotoSet::new();
        set.merge_page(&[photo("1"), photo_with_description("2", "first copy")]);
        set.merge_page(&[photo_with_description("2", "second copy"), photo("3")]);

        let visible = set.photos();
        let ids: Vec<&str> = visible.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(visible[1].alt_description.as_deref(), Some("second copy"));
    }

    #[test]
    fn test_empty_page_terminates_pagination() {
        let mut pager = GalleryPager::new("latest");
        assert_eq!(pager.next_page_number(), Some(1));

        pager.record_page(&[photo("1")], 1_000);
        assert_eq!(pager.next_page_number(), Some(2));

        pager.record_page(&[], 2_000);
        assert!(!pager.has_next_page());
        assert_eq!(pager.next_page_number(), None);
    }

    #[test]
    fn test_freshness_window() {
        let mut pager = GalleryPager::new("nature");
        assert!(!pager.is_fresh(0));

        pager.record_page(&[photo("1")], 10_000);
        assert!(pager.is_fresh(10_000 + CACHE_TTL_MS - 1));
        assert!(!pager.is_fresh(10_000 + CACHE_TTL_MS));
    }

    #[test]
    fn test_empty_category_detection() {
        let mut pager = GalleryPager::new("latest");
        assert!(!pager.is_exhausted_and_empty());

        pager.record_page(&[], 1_000);
        assert!(pager.is_exhausted_and_empty());
    }

    #[tokio::test]
    async fn test_retries_recover_within_budget() {
        let calls = Cell::new(0u32);
        let result: Result<&str, String> = with_retries(MAX_RETRIES, |attempt| {
            calls.set(calls.get() + 1);
            async move {
                if attempt < 2 {
                    Err("boom".to_string())
                } else {
                    Ok("recovered")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "recovered");
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_retry_budget_exhaustion_surfaces_error() {
        // Two retries exhaust after three attempts total; the caller then
        // sees the error, never a partial result.
        let calls = Cell::new(0u32);
        let result: Result<(), String> = with_retries(MAX_RETRIES, |_| {
            calls.set(calls.get() + 1);
            async { Err("still down".to_string()) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.get(), 1 + MAX_RETRIES);
    }
}
