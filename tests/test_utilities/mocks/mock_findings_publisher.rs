use hostvuln::prelude::*;
use std::result::Result;
use hostvuln::shared::error::PublishError;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One call to the mock publisher
#[derive(Debug, Clone)]
pub struct PublishedPayload {
    pub path: PathBuf,
    pub contents: String,
}

/// Mock FindingsPublisher that captures the staged file while it still exists
#[derive(Default, Clone)]
pub struct MockFindingsPublisher {
    should_fail: bool,
    pub published: Arc<Mutex<Vec<PublishedPayload>>>,
}

impl MockFindingsPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    pub fn published(&self) -> Vec<PublishedPayload> {
        self.published.lock().unwrap().clone()
    }

    pub fn payload(&self, index: usize) -> UploadPayload {
        serde_json::from_str(&self.published()[index].contents).unwrap()
    }
}

impl FindingsPublisher for MockFindingsPublisher {
    fn publish(&self, payload_path: &Path) -> Result<(), PublishError> {
        let contents = std::fs::read_to_string(payload_path).map_err(PublishError::Staging)?;
        self.published.lock().unwrap().push(PublishedPayload {
            path: payload_path.to_path_buf(),
            contents,
        });

        if self.should_fail {
            return Err(PublishError::Upload {
                details: "HTTP 500 from upload slot".to_string(),
            });
        }
        Ok(())
    }
}
