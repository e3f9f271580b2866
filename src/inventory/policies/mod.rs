mod version_matching;

pub use version_matching::{
    compare_versions, normalize_key_part, ExactVersionMatcher, RangeVersionMatcher,
    VersionMatcher, VersionMatching,
};
