/// Release discovery: find every directory that directly contains audio
use std::collections::BTreeSet;
use std::path::Path;
use tonearm_core::{natural_cmp, LibraryError, Result};
use walkdir::WalkDir;

/// Recognized audio file extensions (matched case-insensitively)
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "flac", "alac", "dsf", "ape", "tak", // lossless
    "mp3", "opus", "aac", // lossy
    "wv", "ac3", "m4a", "ogg", "wma", // container-dependent
];

/// Whether a filename carries a recognized audio extension
pub fn is_audio_filename(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.as_str()))
}

/// Walk the library root and return every release directory.
///
/// A release is a directory that is the *immediate parent* of at least one
/// audio file; a directory whose audio lives only in subdirectories is not a
/// release itself (multi-disc sets surface as one release per disc folder).
/// Paths are relative to `root` (`"."` for the root itself), deduplicated,
/// in natural-sort order. Symlinked files are followed.
///
/// Unreadable subtrees are logged and skipped; they never abort discovery.
pub fn discover_releases(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(LibraryError::InvalidRoot(root.to_path_buf()));
    }

    let mut dirs = BTreeSet::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable subtree: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if !is_audio_filename(&entry.file_name().to_string_lossy()) {
            continue;
        }
        if let Some(parent) = entry.path().parent() {
            let rel = parent.strip_prefix(root).unwrap_or(parent);
            let key = if rel.as_os_str().is_empty() {
                ".".to_string()
            } else {
                rel.to_string_lossy().into_owned()
            };
            dirs.insert(key);
        }
    }

    let mut releases: Vec<String> = dirs.into_iter().collect();
    releases.sort_by(|a, b| natural_cmp(a, b));
    Ok(releases)
}
