/// Release domain type
use crate::types::track::{TagMap, Track, UploadRefs};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A non-audio entry: only the modification time is recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Filesystem modification time (Unix seconds)
    pub mtime: i64,
}

/// One directory of the library: tracks plus any accompanying images and
/// opaque files, keyed by filename in scan order.
///
/// Release identity is the directory path relative to the library root; the
/// path is the key under `LibraryDb::releases`, not a field here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Release {
    /// Audio files
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub tracks: IndexMap<String, Track>,

    /// Image files
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub images: IndexMap<String, FileEntry>,

    /// Everything else
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub files: IndexMap<String, FileEntry>,

    /// Release-level upload references (for the announcement message)
    #[serde(flatten)]
    pub uploads: UploadRefs,
}

impl Release {
    /// Flattened filename → mtime map across all three categories.
    ///
    /// This is what `mtime_only` scans are compared against.
    pub fn file_mtimes(&self) -> IndexMap<String, i64> {
        let mut mtimes = IndexMap::new();
        for (name, track) in &self.tracks {
            mtimes.insert(name.clone(), track.mtime);
        }
        for (name, entry) in &self.images {
            mtimes.insert(name.clone(), entry.mtime);
        }
        for (name, entry) in &self.files {
            mtimes.insert(name.clone(), entry.mtime);
        }
        mtimes
    }

    /// Copy of this release with every upload reference removed, at the
    /// release level and on every track
    pub fn without_upload_refs(&self) -> Release {
        let mut stripped = self.clone();
        stripped.uploads.clear();
        for track in stripped.tracks.values_mut() {
            track.uploads.clear();
        }
        stripped
    }

    /// Structural equality for move detection: deep equality after removing
    /// all upload references. A relocated, already-uploaded release compares
    /// equal to its fresh scan at the new path.
    pub fn content_eq(&self, other: &Release) -> bool {
        self.without_upload_refs() == other.without_upload_refs()
    }

    /// Tags of the first track, used when one tag set has to stand in for
    /// the whole release (captions, announcements)
    pub fn representative_tags(&self) -> Option<&TagMap> {
        self.tracks.values().next().map(|track| &track.tags)
    }

    /// First value of `tag` on the first track, or `fallback` when either
    /// the track or the tag is absent
    pub fn representative_tag<'a>(&'a self, tag: &str, fallback: &'a str) -> &'a str {
        self.representative_tags()
            .and_then(|tags| tags.get(tag))
            .and_then(|values| values.first())
            .map_or(fallback, String::as_str)
    }
}
