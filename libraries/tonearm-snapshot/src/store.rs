/// Atomic load/save of gzip-compressed JSON snapshots
use crate::error::{Result, SnapshotError};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tonearm_core::LibraryDb;

/// Reads and writes one snapshot file.
///
/// Saves go through a temporary file in the destination directory followed
/// by a rename, so a crash mid-write leaves the previous snapshot intact.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// A store backed by the given snapshot file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot.
    ///
    /// # Errors
    /// `SnapshotError::NotFound` when no file exists, so callers can start a
    /// fresh library; any other failure means the file is present but
    /// unreadable and should not be silently replaced.
    pub fn load(&self) -> Result<LibraryDb> {
        let file = File::open(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SnapshotError::NotFound(self.path.clone())
            } else {
                SnapshotError::Io(e)
            }
        })?;
        let db = serde_json::from_reader(GzDecoder::new(BufReader::new(file)))?;
        tracing::debug!("loaded snapshot from '{}'", self.path.display());
        Ok(db)
    }

    /// Save the snapshot atomically, replacing any previous file
    pub fn save(&self, db: &LibraryDb) -> Result<()> {
        write_atomic(&self.path, db)?;
        tracing::debug!("saved snapshot to '{}'", self.path.display());
        Ok(())
    }

    /// Write a timestamped copy of the snapshot into `dir` (created if
    /// missing) and return its path. Meant to run before a destructive
    /// operation on the live file.
    pub fn backup(&self, db: &LibraryDb, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
        let path = dir.join(format!("library-{stamp}.json.gz"));
        write_atomic(&path, db)?;
        tracing::info!("backed up snapshot to '{}'", path.display());
        Ok(path)
    }
}

fn write_atomic(path: &Path, db: &LibraryDb) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let tmp = match dir {
        Some(dir) => NamedTempFile::new_in(dir)?,
        None => NamedTempFile::new_in(".")?,
    };

    let mut encoder = GzEncoder::new(tmp, Compression::default());
    serde_json::to_writer_pretty(&mut encoder, db)?;
    let tmp = encoder.finish()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}
