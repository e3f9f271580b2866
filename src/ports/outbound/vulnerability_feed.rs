use crate::inventory::domain::VulnerabilityRecord;
use crate::shared::error::FeedError;

/// VulnerabilityFeed port - the complete known-vulnerability set for a resource
///
/// Either every record is returned or an error is; implementations never
/// hand back a partial feed.
pub trait VulnerabilityFeed {
    fn fetch_all(&self, resource_id: &str) -> Result<Vec<VulnerabilityRecord>, FeedError>;
}

impl<T: VulnerabilityFeed + ?Sized> VulnerabilityFeed for Box<T> {
    fn fetch_all(&self, resource_id: &str) -> Result<Vec<VulnerabilityRecord>, FeedError> {
        (**self).fetch_all(resource_id)
    }
}

/// One page of a cursor-paginated feed
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    pub records: Vec<VulnerabilityRecord>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// FeedPageSource port - a single page request against the remote feed
///
/// `page` is the 1-based page number, used only for error reporting.
pub trait FeedPageSource {
    fn fetch_page(
        &self,
        resource_id: &str,
        cursor: Option<&str>,
        page: usize,
    ) -> Result<FeedPage, FeedError>;
}
