use crate::adapters::outbound::filesystem::FileCopyPublisher;
use crate::adapters::outbound::network::{HttpFindingsPublisher, PlatformApiClient};
use crate::ports::outbound::FindingsPublisher;
use std::path::PathBuf;
use std::sync::Arc;

/// Publisher type enumeration for factory pattern
pub enum PublisherType {
    /// Upload to the platform through its API
    Upload(Arc<PlatformApiClient>),
    /// Copy the payload to a local file
    File(PathBuf),
}

/// Factory for creating findings publishers
pub struct PublisherFactory;

impl PublisherFactory {
    /// Creates a publisher instance for the specified type
    ///
    /// # Examples
    /// ```
    /// use hostvuln::application::factories::{PublisherFactory, PublisherType};
    ///
    /// let publisher = PublisherFactory::create(PublisherType::File("findings.json".into()));
    /// ```
    pub fn create(publisher_type: PublisherType) -> Box<dyn FindingsPublisher> {
        match publisher_type {
            PublisherType::Upload(api) => Box::new(HttpFindingsPublisher::new(api)),
            PublisherType::File(path) => Box::new(FileCopyPublisher::new(path)),
        }
    }
}
