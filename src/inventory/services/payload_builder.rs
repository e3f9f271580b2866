use crate::inventory::domain::{Asset, AssetIdentifier, Finding, InventoryItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Integration identifier stamped on every payload unless configured otherwise
pub const DEFAULT_INTEGRATION_ID: &str = "e4341955-463f-4228-aa99-a718e9d93bb5";

/// Wire artifact handed to the publisher
///
/// Field order is declaration order, so serialization is reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPayload {
    pub integration_id: Uuid,
    pub data_sources: Vec<DataSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub id: String,
    pub analysis_date: DateTime<Utc>,
    pub assets: Vec<AssetPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPayload {
    pub asset_identifier: AssetIdentifierPayload,
    pub vulnerability_findings: Vec<FindingPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIdentifierPayload {
    pub cloud_platform: String,
    pub provider_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingPayload {
    /// Vulnerability identifier (CVE / advisory id)
    pub name: String,
    /// Installed component name
    pub detailed_name: String,
    pub version: String,
    pub severity: String,
    pub affected_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecosystem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Finding> for FindingPayload {
    fn from(finding: &Finding) -> Self {
        let record = finding.record();
        let (path, ecosystem, vendor) = match finding.item() {
            InventoryItem::Library(lib) => (Some(lib.path.clone()), lib.ecosystem.clone(), None),
            InventoryItem::Application(app) => (None, None, app.vendor.clone()),
        };

        Self {
            name: record.id.clone(),
            detailed_name: finding.item().name().to_string(),
            version: finding.item().version().to_string(),
            severity: record.severity.as_str().to_string(),
            affected_version: record.version.clone(),
            path,
            ecosystem,
            vendor,
            remediation: record
                .fixed_version
                .as_ref()
                .map(|fixed| format!("Upgrade to version {}", fixed)),
            description: record.description.clone(),
        }
    }
}

impl UploadPayload {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn finding_count(&self) -> usize {
        self.data_sources
            .iter()
            .flat_map(|ds| ds.assets.iter())
            .map(|asset| asset.vulnerability_findings.len())
            .sum()
    }
}

/// PayloadBuilder service assembling the fixed-shape upload payload
pub struct PayloadBuilder {
    integration_id: Uuid,
    identifier: AssetIdentifier,
}

impl PayloadBuilder {
    pub fn new(integration_id: Uuid, identifier: AssetIdentifier) -> Self {
        Self {
            integration_id,
            identifier,
        }
    }

    /// Stamps `asset` and wraps it in one data source dated now.
    pub fn build(&self, asset: Asset, subscription_id: &str) -> UploadPayload {
        self.build_at(asset, subscription_id, Utc::now())
    }

    pub fn build_at(
        &self,
        mut asset: Asset,
        subscription_id: &str,
        analysis_date: DateTime<Utc>,
    ) -> UploadPayload {
        asset.stamp(self.identifier.clone());

        let asset_payload = AssetPayload {
            asset_identifier: AssetIdentifierPayload {
                cloud_platform: self.identifier.cloud_platform.clone(),
                provider_id: self.identifier.provider_id.clone(),
            },
            vulnerability_findings: asset.findings().iter().map(FindingPayload::from).collect(),
        };

        UploadPayload {
            integration_id: self.integration_id,
            data_sources: vec![DataSource {
                id: subscription_id.to_string(),
                analysis_date,
                assets: vec![asset_payload],
            }],
        }
    }
}
