use hostvuln::prelude::*;
use std::result::Result;
use hostvuln::shared::error::FeedError;
use std::sync::{Arc, Mutex};

/// Mock VulnerabilityFeed serving a fixed record list, or failing
#[derive(Default, Clone)]
pub struct MockVulnerabilityFeed {
    records: Vec<VulnerabilityRecord>,
    should_fail: bool,
    pub requested: Arc<Mutex<Vec<String>>>,
}

impl MockVulnerabilityFeed {
    pub fn new(records: Vec<VulnerabilityRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl VulnerabilityFeed for MockVulnerabilityFeed {
    fn fetch_all(&self, resource_id: &str) -> Result<Vec<VulnerabilityRecord>, FeedError> {
        self.requested.lock().unwrap().push(resource_id.to_string());

        if self.should_fail {
            return Err(FeedError::Status {
                page: 2,
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        Ok(self.records.clone())
    }
}
