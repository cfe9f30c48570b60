//! Shared test fixtures: a text-file prober and helpers for building
//! library trees with pinned mtimes.
#![allow(dead_code)] // not every test binary uses every helper
use std::fs::{self, File, FileTimes};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tonearm_core::{AudioDescriptor, ImageValidator, MediaProber, Result, TagMap};

/// Probes plain text files as if they were audio. Files with an audio
/// extension are parsed as `key=value` lines into tags; anything else is
/// reported as not-audio. Lets the scan pipeline run without real codecs.
pub struct TextProber;

const TEXT_AUDIO_EXTENSIONS: &[&str] = &["flac", "mp3", "opus"];

impl MediaProber for TextProber {
    fn probe(&self, path: &Path) -> Result<Option<AudioDescriptor>> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !TEXT_AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            return Ok(None);
        }

        let body = fs::read_to_string(path)?;
        let mut tags = TagMap::new();
        for line in body.lines() {
            if let Some((key, value)) = line.split_once('=') {
                tags.entry(key.trim().to_string())
                    .or_insert_with(Vec::new)
                    .push(value.trim().to_string());
            }
        }
        let has_embedded_artwork = tags.shift_remove("embedded_artwork").is_some();

        Ok(Some(AudioDescriptor {
            bits_per_sample: None,
            sample_rate: None,
            total_samples: None,
            duration_seconds: 60.0,
            tags,
            has_embedded_artwork,
        }))
    }
}

/// Accepts files by extension alone, no decoding
pub struct ExtensionImageValidator;

impl ImageValidator for ExtensionImageValidator {
    fn is_valid_image(&self, path: &Path) -> bool {
        path.extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .is_some_and(|ext| ext == "jpg" || ext == "png")
    }
}

/// Write a file (creating parent directories) and pin its mtime
pub fn write_file(path: &Path, contents: &str, mtime: i64) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
    set_mtime(path, mtime);
}

/// Pin a file's modification time to the given Unix timestamp
pub fn set_mtime(path: &Path, mtime: i64) {
    let file = File::options().write(true).open(path).unwrap();
    let modified = UNIX_EPOCH + Duration::from_secs(mtime as u64);
    file.set_times(FileTimes::new().set_modified(modified))
        .unwrap();
    // Some filesystems round mtimes; make sure the pin took.
    let stored = fs::metadata(path).unwrap().modified().unwrap();
    assert_eq!(
        stored.duration_since(SystemTime::UNIX_EPOCH).unwrap().as_secs(),
        mtime as u64
    );
}
