/// Tag/media prober implementation using lofty
use crate::error::ProbeError;
use lofty::{AudioFile, ItemValue, Tag, TagType, TaggedFileExt};
use std::path::Path;
use tonearm_core::{AudioDescriptor, MediaProber, TagMap};

/// Media prober backed by the lofty library.
///
/// Every container quirk stays behind this type: tag keys are normalized to
/// lower-cased Vorbis-style names regardless of whether they came from ID3
/// frames, APEv2 items, MP4 atoms, or plain Vorbis comments.
pub struct LoftyProber;

impl LoftyProber {
    /// Create a new prober
    pub fn new() -> Self {
        Self
    }

    /// Flatten a lofty tag into a normalized multi-valued map
    fn collect_tags(tag: &Tag) -> TagMap {
        let mut tags = TagMap::new();

        for item in tag.items() {
            // Normalize to the Vorbis naming scheme; unknown keys pass
            // through as-is.
            let Some(key) = item.key().map_key(TagType::VorbisComments, true) else {
                continue;
            };
            let value = match item.value() {
                ItemValue::Text(text) | ItemValue::Locator(text) => text.clone(),
                ItemValue::Binary(_) => continue,
            };
            tags.entry(key.to_lowercase()).or_default().push(value);
        }

        tags
    }
}

impl Default for LoftyProber {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaProber for LoftyProber {
    fn probe(&self, path: &Path) -> tonearm_core::Result<Option<AudioDescriptor>> {
        let tagged_file = match lofty::read_from_path(path) {
            Ok(file) => file,
            // Not recognized as audio at all: the classifier will try the
            // image validator next.
            Err(e) if matches!(e.kind(), lofty::error::ErrorKind::UnknownFormat) => {
                return Ok(None)
            }
            Err(e) => return Err(ProbeError::from(e).into()),
        };

        let properties = tagged_file.properties();
        let duration_seconds = properties.duration().as_secs_f64();
        let sample_rate = properties.sample_rate();
        let bits_per_sample = properties.bit_depth().map(u32::from);

        let tags = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.tags().first())
            .map(Self::collect_tags)
            .unwrap_or_default();

        let has_embedded_artwork = tagged_file
            .tags()
            .iter()
            .any(|tag| !tag.pictures().is_empty());

        Ok(Some(AudioDescriptor {
            bits_per_sample,
            sample_rate,
            // lofty does not report native sample counts; the classifier
            // derives them from rate and duration.
            total_samples: None,
            duration_seconds,
            tags,
            has_embedded_artwork,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn text_file_is_not_audio() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "not audio").unwrap();

        let prober = LoftyProber::new();
        assert!(prober.probe(&path).unwrap().is_none());
    }

    #[test]
    fn missing_file_is_an_error() {
        let prober = LoftyProber::new();
        assert!(prober.probe(Path::new("/nonexistent/file.flac")).is_err());
    }
}
