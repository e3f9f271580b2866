use super::api_client::{GraphQlError, PlatformApiClient};
use crate::inventory::domain::{Severity, VulnerabilityRecord};
use crate::ports::outbound::{FeedPage, FeedPageSource};
use crate::shared::error::FeedError;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

const FINDINGS_QUERY: &str = r#"query VulnerabilityFindingsPage($filterBy: VulnerabilityFindingFilters, $first: Int, $after: String) {
  vulnerabilityFindings(filterBy: $filterBy, first: $first, after: $after) {
    nodes {
      name
      detailedName
      version
      severity
      fixedVersion
      description
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}"#;

/// Default number of records requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// A vulnerability finding as the platform reports it
///
/// Also the element type of the `known_vulns.json` fixture file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityNode {
    /// Advisory id (CVE-...)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Affected component
    #[serde(default, deserialize_with = "null_as_empty")]
    pub detailed_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub severity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The platform sends `null` for unknown string fields.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Converts feed nodes into records, dropping nodes that name no advisory or
/// no component since they can never match an inventory item.
pub fn nodes_to_records(nodes: Vec<VulnerabilityNode>) -> Vec<VulnerabilityRecord> {
    nodes
        .into_iter()
        .filter(|node| {
            let usable = !node.name.trim().is_empty() && !node.detailed_name.trim().is_empty();
            if !usable {
                tracing::warn!(name = %node.name, component = %node.detailed_name, "Skipping feed entry without advisory id or component");
            }
            usable
        })
        .map(Into::into)
        .collect()
}

impl From<VulnerabilityNode> for VulnerabilityRecord {
    fn from(node: VulnerabilityNode) -> Self {
        VulnerabilityRecord {
            id: node.name,
            component: node.detailed_name,
            version: node.version,
            severity: Severity::parse(&node.severity),
            fixed_version: node.fixed_version.filter(|v| !v.is_empty()),
            description: node.description.filter(|d| !d.is_empty()),
        }
    }
}

impl From<&VulnerabilityRecord> for VulnerabilityNode {
    fn from(record: &VulnerabilityRecord) -> Self {
        VulnerabilityNode {
            name: record.id.clone(),
            detailed_name: record.component.clone(),
            version: record.version.clone(),
            severity: record.severity.as_str().to_uppercase(),
            fixed_version: record.fixed_version.clone(),
            description: record.description.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindingsData {
    vulnerability_findings: FindingsConnection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindingsConnection {
    #[serde(default)]
    nodes: Vec<VulnerabilityNode>,
    page_info: PageInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

impl From<FindingsData> for FeedPage {
    fn from(data: FindingsData) -> Self {
        let connection = data.vulnerability_findings;
        FeedPage {
            records: nodes_to_records(connection.nodes),
            has_next_page: connection.page_info.has_next_page,
            end_cursor: connection.page_info.end_cursor.filter(|c| !c.is_empty()),
        }
    }
}

fn page_variables(resource_id: &str, page_size: u32, cursor: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "first": page_size,
        "after": cursor,
        "filterBy": {
            "assetId": [resource_id],
        },
    })
}

fn to_feed_error(error: GraphQlError, page: usize) -> FeedError {
    match error {
        GraphQlError::Request(details) => FeedError::Request { page, details },
        GraphQlError::Status { status, body } => FeedError::Status { page, status, body },
        GraphQlError::Errors(messages) => FeedError::Query { page, messages },
        GraphQlError::Decode(details) => FeedError::Decode { page, details },
    }
}

/// GraphQlFeedSource adapter - one findings page per GraphQL request
pub struct GraphQlFeedSource {
    api: Arc<PlatformApiClient>,
    page_size: u32,
}

impl GraphQlFeedSource {
    pub fn new(api: Arc<PlatformApiClient>) -> Self {
        Self {
            api,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

impl FeedPageSource for GraphQlFeedSource {
    fn fetch_page(
        &self,
        resource_id: &str,
        cursor: Option<&str>,
        page: usize,
    ) -> Result<FeedPage, FeedError> {
        let data: FindingsData = self
            .api
            .graphql(FINDINGS_QUERY, page_variables(resource_id, self.page_size, cursor))
            .map_err(|e| to_feed_error(e, page))?;
        Ok(data.into())
    }
}
