use crate::inventory::domain::VulnerabilityRecord;
use crate::ports::outbound::{FeedPageSource, VulnerabilityFeed};
use crate::shared::error::FeedError;

/// PagedVulnerabilityFeed - drains a cursor-paginated source
///
/// Keeps requesting pages until the source reports no next page. Any page
/// failure discards everything collected so far. A page that claims more data
/// without handing out a fresh cursor is an error, never a loop.
pub struct PagedVulnerabilityFeed<S> {
    source: S,
}

impl<S: FeedPageSource> PagedVulnerabilityFeed<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: FeedPageSource> VulnerabilityFeed for PagedVulnerabilityFeed<S> {
    fn fetch_all(&self, resource_id: &str) -> Result<Vec<VulnerabilityRecord>, FeedError> {
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page = 1;

        loop {
            let response = self.source.fetch_page(resource_id, cursor.as_deref(), page)?;
            tracing::debug!(page, records = response.records.len(), has_next_page = response.has_next_page, "Fetched feed page");
            records.extend(response.records);

            if !response.has_next_page {
                break;
            }

            match response.end_cursor {
                Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
                Some(_) => {
                    return Err(FeedError::Pagination {
                        page,
                        details: "next page requested with an unchanged cursor".to_string(),
                    })
                }
                None => {
                    return Err(FeedError::Pagination {
                        page,
                        details: "more pages reported but no end cursor returned".to_string(),
                    })
                }
            }
            page += 1;
        }

        tracing::info!(records = records.len(), pages = page, "Vulnerability feed assembled");
        Ok(records)
    }
}
