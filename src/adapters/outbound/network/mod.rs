/// Network adapters for the vulnerability platform API
mod api_client;
mod feed_source;
mod paged_feed;
mod publisher;

pub use api_client::{GraphQlError, PlatformApiClient, PlatformCredentials};
pub use feed_source::{nodes_to_records, GraphQlFeedSource, VulnerabilityNode, DEFAULT_PAGE_SIZE};
pub use paged_feed::PagedVulnerabilityFeed;
pub use publisher::HttpFindingsPublisher;
