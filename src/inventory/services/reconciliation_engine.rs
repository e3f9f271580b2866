use crate::inventory::domain::{
    AggregatedInventory, Asset, Finding, InventoryItem, VulnerabilityRecord,
};
use crate::inventory::policies::{normalize_key_part, VersionMatcher, VersionMatching};
use crate::shared::error::ReconciliationError;
use std::collections::HashMap;

/// Normalized (name, version) pair used to pair inventory with the feed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchKey {
    pub name: String,
    pub version: String,
}

impl MatchKey {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: normalize_key_part(name),
            version: normalize_key_part(version),
        }
    }

    pub fn for_item(item: &InventoryItem) -> Self {
        Self::new(item.name(), item.version())
    }

    pub fn for_record(record: &VulnerabilityRecord) -> Self {
        Self::new(&record.component, &record.version)
    }
}

/// ReconciliationEngine service matching aggregated inventory against the feed
///
/// Matching is many-to-many. Findings come out in inventory order, and within
/// one item in feed order; nothing is ranked or deduplicated.
pub struct ReconciliationEngine {
    matcher: Box<dyn VersionMatcher>,
}

impl ReconciliationEngine {
    pub fn new(matching: VersionMatching) -> Self {
        Self::with_matcher(matching.matcher())
    }

    pub fn with_matcher(matcher: Box<dyn VersionMatcher>) -> Self {
        Self { matcher }
    }

    /// Produces an unstamped [`Asset`] holding every finding.
    ///
    /// An empty asset is a normal outcome; the caller decides to stop there.
    ///
    /// # Errors
    /// Returns [`ReconciliationError::MalformedRecord`] when a feed record has
    /// no identifier or no component name.
    pub fn reconcile(
        &self,
        inventory: &AggregatedInventory,
        feed: &[VulnerabilityRecord],
    ) -> Result<Asset, ReconciliationError> {
        let index = Self::index_feed(feed)?;

        let mut findings = Vec::new();
        for item in inventory.items() {
            let key = MatchKey::for_item(item);
            let Some(candidates) = index.get(&key.name) else {
                continue;
            };
            for (position, record_key) in candidates {
                if self.matcher.matches(&key.version, &record_key.version) {
                    findings.push(Finding::new(item.clone(), feed[*position].clone()));
                }
            }
        }

        Ok(Asset::new(findings))
    }

    /// Groups record positions by normalized component name, keeping feed order.
    fn index_feed(
        feed: &[VulnerabilityRecord],
    ) -> Result<HashMap<String, Vec<(usize, MatchKey)>>, ReconciliationError> {
        let mut index: HashMap<String, Vec<(usize, MatchKey)>> = HashMap::new();

        for (position, record) in feed.iter().enumerate() {
            if record.id.trim().is_empty() {
                return Err(ReconciliationError::MalformedRecord {
                    index: position,
                    reason: "missing vulnerability identifier".to_string(),
                });
            }
            if record.component.trim().is_empty() {
                return Err(ReconciliationError::MalformedRecord {
                    index: position,
                    reason: format!("{} has no affected component", record.id),
                });
            }

            let key = MatchKey::for_record(record);
            index
                .entry(key.name.clone())
                .or_default()
                .push((position, key));
        }

        Ok(index)
    }
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new(VersionMatching::Exact)
    }
}
