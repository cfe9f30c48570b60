/// Collaborator traits for Tonearm
use crate::error::Result;
use crate::types::TagMap;
use std::path::Path;

/// Structured description of one audio file, as returned by a `MediaProber`.
///
/// Raw tag keys are reported exactly as the prober sees them; numbering
/// splits and key ordering are applied later by the entry classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioDescriptor {
    /// Bits per sample, if the container reports it
    pub bits_per_sample: Option<u32>,

    /// Sample rate in Hz, if the container reports it
    pub sample_rate: Option<u32>,

    /// Total sample count, if natively available
    pub total_samples: Option<u64>,

    /// Duration in seconds
    pub duration_seconds: f64,

    /// Raw multi-valued tag map
    pub tags: TagMap,

    /// Whether the file carries embedded artwork
    pub has_embedded_artwork: bool,
}

/// Tag/media prober trait
///
/// Implementers open a file and report its audio properties, or decide that
/// it is not an audio file at all. Container-format quirks (ID3 slash
/// notation, APEv2 case folding, ...) belong entirely behind this trait; the
/// scanning core only ever sees the uniform `AudioDescriptor`.
pub trait MediaProber: Send + Sync {
    /// Probe a file as audio.
    ///
    /// Returns `Ok(None)` when the file is not recognized as audio.
    ///
    /// # Errors
    /// Returns an error only for I/O-level failures; callers treat those as
    /// per-file, non-fatal conditions.
    fn probe(&self, path: &Path) -> Result<Option<AudioDescriptor>>;
}

/// Image validator trait
///
/// Implementers decide whether a non-audio file is a readable image.
pub trait ImageValidator: Send + Sync {
    /// Check whether the file at `path` is a valid image
    fn is_valid_image(&self, path: &Path) -> bool;
}
