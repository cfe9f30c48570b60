//! Tonearm Snapshot
//!
//! Persistence for `LibraryDb`: gzip-compressed JSON snapshots written
//! atomically, plus timestamped backups. The snapshot is treated as an
//! opaque blob that is replaced wholesale on every save; there is no
//! partial or in-place update.

#![forbid(unsafe_code)]

mod error;
mod store;

pub use error::{Result, SnapshotError};
pub use store::SnapshotStore;
