use crate::shared::error::PublishError;
use std::path::Path;

/// FindingsPublisher port - hands a serialized payload file to its destination
///
/// The caller owns the file and deletes it after this returns, whatever the
/// outcome.
pub trait FindingsPublisher {
    fn publish(&self, payload_path: &Path) -> Result<(), PublishError>;
}

impl<T: FindingsPublisher + ?Sized> FindingsPublisher for Box<T> {
    fn publish(&self, payload_path: &Path) -> Result<(), PublishError> {
        (**self).publish(payload_path)
    }
}
