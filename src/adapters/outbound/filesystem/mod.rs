/// Filesystem adapters for local output and volume discovery
mod file_writer;
mod volume_discovery;

pub use file_writer::FileCopyPublisher;
pub use volume_discovery::discover_volumes;
