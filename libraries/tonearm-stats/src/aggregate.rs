/// Statistics aggregation: one pass over every release and track
use indexmap::IndexMap;
use std::path::Path;
use tonearm_core::types::{Release, Statistics, Track};

/// ReplayGain peak tag, track mode
pub const TRACK_PEAK_TAG: &str = "replaygain_track_peak";
/// ReplayGain gain tag, track mode
pub const TRACK_GAIN_TAG: &str = "replaygain_track_gain";
/// ReplayGain peak tag, album mode
pub const ALBUM_PEAK_TAG: &str = "replaygain_album_peak";
/// ReplayGain gain tag, album mode
pub const ALBUM_GAIN_TAG: &str = "replaygain_album_gain";

/// Decibels to linear amplitude factor
pub fn db_gain(gain_db: f64) -> f64 {
    10f64.powf(gain_db / 20.0)
}

/// Gain-compensated peak from a linear peak value and a gain tag string.
///
/// The gain string carries a `dB` or `LUFS` suffix (any case). A gain that
/// parses to positive infinity is the tagging convention's sentinel for
/// "silence, gain undefined": no compensation applies and `None` is
/// returned. Unparseable gain strings are treated the same way.
pub fn compensated_peak(peak: f64, gain: &str) -> Option<f64> {
    let lowered = gain.trim().to_ascii_lowercase();
    let stripped = lowered.strip_suffix("db").unwrap_or(&lowered);
    let stripped = stripped.strip_suffix("lufs").unwrap_or(stripped);
    let gain_db: f64 = stripped.trim().parse().ok()?;
    if gain_db == f64::INFINITY {
        return None;
    }
    Some(peak * db_gain(gain_db))
}

fn paired_peak(track: &Track, peak_tag: &str, gain_tag: &str) -> Option<f64> {
    let peak: f64 = track.tag(peak_tag)?.trim().parse().ok()?;
    let gain = track.tag(gain_tag)?;
    compensated_peak(peak, gain)
}

/// Compensated peak in track-gain mode, when both tags are present
pub fn track_peak(track: &Track) -> Option<f64> {
    paired_peak(track, TRACK_PEAK_TAG, TRACK_GAIN_TAG)
}

/// Compensated peak in album-gain mode, when both tags are present
pub fn album_peak(track: &Track) -> Option<f64> {
    paired_peak(track, ALBUM_PEAK_TAG, ALBUM_GAIN_TAG)
}

/// Recompute the full statistics blob from a release map.
///
/// `critical_tags` and `wanted_tags` drive the lacking-tag counters. The
/// lacking-tag and artwork buckets are kept disjoint: a track that belongs
/// in `both` is counted there and nowhere else.
pub fn calc_stats(
    releases: &IndexMap<String, Release>,
    critical_tags: &[String],
    wanted_tags: &[String],
) -> Statistics {
    let mut stats = Statistics::default();
    let counts = &mut stats.track_counts;

    for release in releases.values() {
        counts.total += release.tracks.len() as u64;
        let has_external_artwork = !release.images.is_empty();

        for (track_name, track) in &release.tracks {
            stats.total_length += track.length;

            let track_mode = track_peak(track);
            let album_mode = album_peak(track);
            if let Some(peak) = track_mode {
                stats.max_track_peak = stats.max_track_peak.max(peak);
            }
            if let Some(peak) = album_mode {
                stats.max_album_peak = stats.max_album_peak.max(peak);
            }
            if track_mode.is_some_and(|p| p > 1.0) || album_mode.is_some_and(|p| p > 1.0) {
                counts.clipping += 1;
            }

            if track.uploads.upload_id_original.is_some() {
                counts.uploaded_original += 1;
            }
            if track.uploads.upload_id_alt.is_some() {
                counts.uploaded_alt += 1;
            }

            let extension = Path::new(track_name)
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
                .unwrap_or_default();
            *counts.by_extension.entry(extension).or_default() += 1;
            *counts.by_depth.entry(track.depth).or_default() += 1;
            *counts.by_rate.entry(track.rate).or_default() += 1;

            let missing_critical = critical_tags
                .iter()
                .any(|tag| !track.tags.contains_key(tag));
            let missing_wanted = wanted_tags.iter().any(|tag| !track.tags.contains_key(tag));
            match (missing_critical, missing_wanted) {
                (true, true) => counts.lacking_tags.both += 1,
                (true, false) => counts.lacking_tags.critical += 1,
                (false, true) => counts.lacking_tags.wanted += 1,
                (false, false) => {}
            }

            match (track.embedded_artwork, has_external_artwork) {
                (true, true) => counts.artwork.both += 1,
                (true, false) => counts.artwork.embedded_only += 1,
                (false, true) => counts.artwork.external_only += 1,
                (false, false) => {}
            }
        }
    }

    stats
}
