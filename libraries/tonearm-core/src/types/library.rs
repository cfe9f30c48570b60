/// Library snapshot root entity
use crate::types::release::Release;
use crate::types::statistics::Statistics;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Snapshot schema version, bumped on incompatible layout changes
pub const SCHEMA_VERSION: &str = "1";

/// The persisted snapshot of one library.
///
/// Owned exclusively by the synchronization pipeline: the differencing
/// engine and the statistics aggregator are the only mutators. Persistence
/// treats the whole value as an opaque blob that is replaced wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryDb {
    /// Library root directory
    pub root: PathBuf,

    /// Releases keyed by path relative to `root`
    pub releases: IndexMap<String, Release>,

    /// Derived statistics, recomputed on every successful update
    pub statistics: Statistics,

    /// Unix timestamp of the last successful update
    pub update_time: i64,

    /// Snapshot schema version
    pub schema_version: String,
}

impl LibraryDb {
    /// Create an empty snapshot for the given root
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            releases: IndexMap::new(),
            statistics: Statistics::default(),
            update_time: 0,
            schema_version: SCHEMA_VERSION.to_string(),
        }
    }
}
