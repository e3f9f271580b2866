use super::{InventoryItem, VulnerabilityRecord};

/// Pairing of one inventory item with one vulnerability record it matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    item: InventoryItem,
    record: VulnerabilityRecord,
}

impl Finding {
    pub fn new(item: InventoryItem, record: VulnerabilityRecord) -> Self {
        Self { item, record }
    }

    pub fn item(&self) -> &InventoryItem {
        &self.item
    }

    pub fn record(&self) -> &VulnerabilityRecord {
        &self.record
    }
}

/// Identity of the cloud resource the findings belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetIdentifier {
    pub cloud_platform: String,
    pub provider_id: String,
}

impl AssetIdentifier {
    pub fn new(cloud_platform: impl Into<String>, provider_id: impl Into<String>) -> Self {
        Self {
            cloud_platform: cloud_platform.into(),
            provider_id: provider_id.into(),
        }
    }
}

/// Unit of findings for one cloud resource
///
/// Produced unstamped by reconciliation; the payload builder stamps it with
/// the run's platform and provider id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Asset {
    identifier: Option<AssetIdentifier>,
    findings: Vec<Finding>,
}

impl Asset {
    pub fn new(findings: Vec<Finding>) -> Self {
        Self {
            identifier: None,
            findings,
        }
    }

    pub fn stamp(&mut self, identifier: AssetIdentifier) {
        self.identifier = Some(identifier);
    }

    pub fn identifier(&self) -> Option<&AssetIdentifier> {
        self.identifier.as_ref()
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}
