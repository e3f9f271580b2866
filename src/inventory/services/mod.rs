mod path_normalizer;
mod payload_builder;
mod reconciliation_engine;

pub use path_normalizer::{PathNormalizer, SeparatorStyle};
pub use payload_builder::{
    AssetIdentifierPayload, AssetPayload, DataSource, FindingPayload, PayloadBuilder,
    UploadPayload, DEFAULT_INTEGRATION_ID,
};
pub use reconciliation_engine::{MatchKey, ReconciliationEngine};
