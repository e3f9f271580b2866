use crate::inventory::domain::{AssetIdentifier, Volume};
use crate::inventory::policies::VersionMatching;
use crate::inventory::services::SeparatorStyle;
use uuid::Uuid;

/// ScanRequest - Internal request DTO for one pipeline run
///
/// Plain values resolved from configuration; nothing here touches the host.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Volumes to scan, in processing order
    pub volumes: Vec<Volume>,
    /// Platform id of the cloud resource whose feed is fetched
    pub resource_id: String,
    /// Data source id written into the payload
    pub subscription_id: String,
    /// Cloud platform and provider id stamped onto the asset
    pub asset_identifier: AssetIdentifier,
    pub integration_id: Uuid,
    pub version_matching: VersionMatching,
    pub separator_style: SeparatorStyle,
}

impl ScanRequest {
    pub fn new(
        volumes: Vec<Volume>,
        resource_id: impl Into<String>,
        subscription_id: impl Into<String>,
        asset_identifier: AssetIdentifier,
        integration_id: Uuid,
    ) -> Self {
        Self {
            volumes,
            resource_id: resource_id.into(),
            subscription_id: subscription_id.into(),
            asset_identifier,
            integration_id,
            version_matching: VersionMatching::default(),
            separator_style: SeparatorStyle::native(),
        }
    }

    pub fn with_version_matching(mut self, version_matching: VersionMatching) -> Self {
        self.version_matching = version_matching;
        self
    }

    pub fn with_separator_style(mut self, separator_style: SeparatorStyle) -> Self {
        self.separator_style = separator_style;
        self
    }
}
