//! Tonearm Scan
//!
//! The synchronization core: release discovery, directory scanning, and the
//! incremental differencing engine that keeps a `LibraryDb` snapshot in step
//! with the filesystem.
//!
//! This crate provides:
//! - Recursive release discovery (directories directly containing audio)
//! - Release scanning in full or mtime-only mode, with entry classification
//!   through the `MediaProber` / `ImageValidator` collaborators
//! - `LibraryUpdater`: the new/deleted/modified split, move detection that
//!   preserves upload references across renames, and the statistics refresh
//!
//! # Example
//!
//! ```rust,no_run
//! use tonearm_core::types::LibraryDb;
//! use tonearm_probe::{LoftyProber, StandardImageValidator};
//! use tonearm_scan::LibraryUpdater;
//! use std::path::PathBuf;
//!
//! # fn example() -> tonearm_core::Result<()> {
//! let prober = LoftyProber::new();
//! let validator = StandardImageValidator::new();
//! let mut db = LibraryDb::new(PathBuf::from("/music"));
//!
//! let report = LibraryUpdater::new(&prober, &validator)
//!     .trust_mtime(true)
//!     .update(&mut db)?;
//! println!("{} deleted, {} modified", report.deleted.len(), report.modified.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod discovery;
mod progress;
mod scanner;
mod update;

pub use discovery::{discover_releases, is_audio_filename, AUDIO_EXTENSIONS};
pub use progress::{ProgressCallback, UpdateProgress};
pub use scanner::{scan_mtimes, ReleaseScanner, PROBE_BYPASS_EXTENSIONS};
pub use update::{LibraryUpdater, UpdateReport};
