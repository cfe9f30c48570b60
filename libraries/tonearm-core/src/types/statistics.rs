/// Derived statistics types
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate statistics over a whole snapshot.
///
/// Never hand-edited and never patched incrementally: the aggregator
/// recomputes the entire value from the release map on every update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Highest gain-compensated track peak seen anywhere in the library
    pub max_track_peak: f64,

    /// Highest gain-compensated album peak seen anywhere in the library
    pub max_album_peak: f64,

    /// Sum of all track durations, in seconds
    pub total_length: f64,

    /// Per-track counters
    pub track_counts: TrackCounts,
}

/// Per-track counters and histograms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackCounts {
    /// Total number of tracks
    pub total: u64,

    /// Tracks whose compensated peak exceeds 1.0 in either gain mode
    pub clipping: u64,

    /// Tracks uploaded on the original channel
    pub uploaded_original: u64,

    /// Tracks uploaded on the alternate channel
    pub uploaded_alt: u64,

    /// Frequency count by lower-cased file extension (leading dot included)
    pub by_extension: BTreeMap<String, u64>,

    /// Frequency count by bit depth
    pub by_depth: BTreeMap<u32, u64>,

    /// Frequency count by sample rate
    pub by_rate: BTreeMap<u32, u64>,

    /// Tracks missing configured tags; the three buckets are disjoint
    pub lacking_tags: LackingTagCounts,

    /// Artwork presence; the three buckets are disjoint
    pub artwork: ArtworkCounts,
}

/// Tracks missing critical and/or wanted tags (disjoint buckets)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LackingTagCounts {
    /// Missing a critical tag but no wanted tag
    pub critical: u64,

    /// Missing a wanted tag but no critical tag
    pub wanted: u64,

    /// Missing both
    pub both: u64,
}

/// Artwork presence per track (disjoint buckets)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkCounts {
    /// Embedded artwork only
    pub embedded_only: u64,

    /// External image files in the release directory only
    pub external_only: u64,

    /// Both embedded and external artwork
    pub both: u64,
}
