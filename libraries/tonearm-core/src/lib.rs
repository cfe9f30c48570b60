//! Tonearm Core
//!
//! Domain types, collaborator traits, and error handling for the Tonearm
//! library snapshot pipeline.
//!
//! This crate defines:
//! - **Domain Types**: `Track`, `Release`, `LibraryDb`, `Statistics`
//! - **Collaborator Traits**: `MediaProber`, `ImageValidator`
//! - **Error Handling**: Unified `LibraryError` and `Result` types
//! - **Ordering**: the natural-sort comparator used wherever entry order
//!   is observable
//!
//! # Example
//!
//! ```rust
//! use tonearm_core::types::{LibraryDb, Release, Track};
//! use std::path::PathBuf;
//!
//! let mut db = LibraryDb::new(PathBuf::from("/music"));
//! db.releases.insert("Artist/Album".to_string(), Release::default());
//! assert_eq!(db.statistics.track_counts.total, 0);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod natsort;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{LibraryError, Result};
pub use natsort::natural_cmp;
pub use traits::{AudioDescriptor, ImageValidator, MediaProber};
pub use types::{
    FileEntry, LibraryDb, Release, Statistics, TagMap, Track, TrackCounts, UploadRefs,
    SCHEMA_VERSION,
};
