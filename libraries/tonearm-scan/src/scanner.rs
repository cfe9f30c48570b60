/// Release scanning and entry classification
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;
use tonearm_core::types::{FileEntry, Release, TagMap, Track};
use tonearm_core::{natural_cmp, AudioDescriptor, ImageValidator, MediaProber, Result};

/// Extensions never handed to the audio prober: some probers mis-identify
/// these containers as audio
pub const PROBE_BYPASS_EXTENSIONS: &[&str] = &["mid", "midi", "mov", "webp"];

fn mtime_of(metadata: &fs::Metadata) -> i64 {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Plain files of a directory in natural name order, with their mtimes.
/// Symlinks are followed; an entry that cannot be stat'ed (dangling
/// symlink, permission change mid-scan) is kept with an mtime of 0 so the
/// classifier can still demote it to an opaque file.
fn list_files(dir: &Path) -> Result<Vec<(String, i64)>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        match fs::metadata(entry.path()) {
            Ok(metadata) if metadata.is_file() => files.push((name, mtime_of(&metadata))),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("cannot stat '{}': {e}", entry.path().display());
                files.push((name, 0));
            }
        }
    }
    files.sort_by(|a, b| natural_cmp(&a.0, &b.0));
    Ok(files)
}

/// The cheap probe mode: filename → mtime for every file entry, nothing
/// opened. Used to decide "has this release changed at all" without
/// re-parsing a single tag.
pub fn scan_mtimes(dir: &Path) -> Result<IndexMap<String, i64>> {
    Ok(list_files(dir)?.into_iter().collect())
}

/// Split combined "3/12" numbering into primary + total tags.
/// The total is only recorded for exactly two components.
fn split_numbering(tags: &mut TagMap, primary: &str, total: &str) {
    let Some(first) = tags.get(primary).and_then(|values| values.first()).cloned() else {
        return;
    };
    let parts: Vec<&str> = first.split('/').collect();
    tags.insert(primary.to_string(), vec![parts[0].to_string()]);
    if parts.len() == 2 {
        tags.insert(total.to_string(), vec![parts[1].to_string()]);
    }
}

/// Apply the numbering splits and natural-sort the keys
pub(crate) fn normalize_tags(mut tags: TagMap) -> TagMap {
    split_numbering(&mut tags, "tracknumber", "totaltracks");
    split_numbering(&mut tags, "discnumber", "totaldiscs");
    let mut entries: Vec<(String, Vec<String>)> = tags.into_iter().collect();
    entries.sort_by(|a, b| natural_cmp(&a.0, &b.0));
    entries.into_iter().collect()
}

fn track_from_descriptor(mtime: i64, descriptor: AudioDescriptor) -> Track {
    let mut track = Track::new(mtime);
    if let Some(depth) = descriptor.bits_per_sample {
        track.depth = depth;
    }
    if let Some(rate) = descriptor.sample_rate {
        track.rate = rate;
    }
    track.length = descriptor.duration_seconds;
    track.samples = descriptor
        .total_samples
        .unwrap_or_else(|| (f64::from(track.rate) * track.length).round() as u64);
    track.embedded_artwork = descriptor.has_embedded_artwork;
    track.tags = normalize_tags(descriptor.tags);
    track
}

/// Scans one release directory into a `Release` record
pub struct ReleaseScanner<'a> {
    prober: &'a dyn MediaProber,
    validator: &'a dyn ImageValidator,
}

impl<'a> ReleaseScanner<'a> {
    /// Create a scanner over the given collaborators
    pub fn new(prober: &'a dyn MediaProber, validator: &'a dyn ImageValidator) -> Self {
        Self { prober, validator }
    }

    /// Full scan: classify every file entry into a track, image, or opaque
    /// file. Per-file errors are logged and the file demoted; they never
    /// abort the scan.
    pub fn scan(&self, dir: &Path) -> Result<Release> {
        let mut release = Release::default();
        for (name, mtime) in list_files(dir)? {
            self.classify(&dir.join(&name), &name, mtime, &mut release);
        }
        Ok(release)
    }

    fn classify(&self, path: &Path, name: &str, mtime: i64, release: &mut Release) {
        let bypass = extension_of(name)
            .is_some_and(|ext| PROBE_BYPASS_EXTENSIONS.contains(&ext.as_str()));
        if !bypass {
            match self.prober.probe(path) {
                Ok(Some(descriptor)) => {
                    release
                        .tracks
                        .insert(name.to_string(), track_from_descriptor(mtime, descriptor));
                    return;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("probe failed on '{}': {e}", path.display());
                }
            }
        }
        if self.validator.is_valid_image(path) {
            release.images.insert(name.to_string(), FileEntry { mtime });
        } else {
            release.files.insert(name.to_string(), FileEntry { mtime });
        }
    }
}
