//! Domain types for the library snapshot

mod library;
mod release;
mod statistics;
mod track;

pub use library::{LibraryDb, SCHEMA_VERSION};
pub use release::{FileEntry, Release};
pub use statistics::{ArtworkCounts, LackingTagCounts, Statistics, TrackCounts};
pub use track::{TagMap, Track, UploadRefs};
