//! Read-only queries over a library snapshot.
//!
//! Pure functions over the release map: nothing here mutates state, and the
//! caller decides what to do with the findings (retag, reupload, clean up).

use crate::aggregate::{album_peak, track_peak};
use indexmap::IndexMap;
use std::path::Path;
use tonearm_core::types::Release;
use tonearm_core::{LibraryError, Result};

/// Which ReplayGain pairing a peak query should use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GainMode {
    /// `replaygain_track_peak` + `replaygain_track_gain`
    Track,
    /// `replaygain_album_peak` + `replaygain_album_gain`
    Album,
}

/// Upload delivery channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadChannel {
    /// Original files
    Original,
    /// Transcoded alternate
    Alt,
}

/// Upload backlog for one channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadQueue {
    /// Releases with no upload reference at all, in snapshot order
    pub pending: Vec<String>,
    /// The at-most-one release with a link but no id (upload started,
    /// announcement not finalized)
    pub in_flight: Option<String>,
}

fn track_path(release_path: &str, track_name: &str) -> String {
    Path::new(release_path).join(track_name).display().to_string()
}

/// Tracks missing a tag, grouped by release path
pub fn tracks_lacking_tag(
    releases: &IndexMap<String, Release>,
    tag: &str,
) -> IndexMap<String, Vec<String>> {
    let mut found: IndexMap<String, Vec<String>> = IndexMap::new();
    for (release_path, release) in releases {
        for (track_name, track) in &release.tracks {
            if !track.tags.contains_key(tag) {
                found
                    .entry(release_path.clone())
                    .or_default()
                    .push(track_path(release_path, track_name));
            }
        }
    }
    found
}

/// Releases whose tracks do not all share one file extension
pub fn multi_extension_releases(releases: &IndexMap<String, Release>) -> Vec<String> {
    let mut found = Vec::new();
    for (release_path, release) in releases {
        let mut extensions: Vec<Option<String>> = Vec::new();
        for track_name in release.tracks.keys() {
            let ext = Path::new(track_name)
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase());
            if !extensions.contains(&ext) {
                extensions.push(ext);
                if extensions.len() > 1 {
                    found.push(release_path.clone());
                    break;
                }
            }
        }
    }
    found
}

/// Releases where a tag's first value differs between tracks
pub fn inconsistent_tag_releases(releases: &IndexMap<String, Release>, tag: &str) -> Vec<String> {
    let mut found = Vec::new();
    for (release_path, release) in releases {
        let mut seen: Vec<&str> = Vec::new();
        for track in release.tracks.values() {
            if let Some(value) = track.tag(tag) {
                if !seen.contains(&value) {
                    seen.push(value);
                    if seen.len() > 1 {
                        found.push(release_path.clone());
                        break;
                    }
                }
            }
        }
    }
    found
}

/// Compensated peaks per track in the chosen gain mode, ascending by peak.
///
/// Tracks without the required tag pair (or with the undefined-gain
/// sentinel) are omitted.
pub fn compensated_peaks(
    releases: &IndexMap<String, Release>,
    mode: GainMode,
) -> Vec<(String, f64)> {
    let mut peaks = Vec::new();
    for (release_path, release) in releases {
        for (track_name, track) in &release.tracks {
            let peak = match mode {
                GainMode::Track => track_peak(track),
                GainMode::Album => album_peak(track),
            };
            if let Some(peak) = peak {
                peaks.push((track_path(release_path, track_name), peak));
            }
        }
    }
    peaks.sort_by(|a, b| a.1.total_cmp(&b.1));
    peaks
}

/// Tracks predicted to clip after normalization in the chosen gain mode
pub fn clipping_tracks(releases: &IndexMap<String, Release>, mode: GainMode) -> Vec<(String, f64)> {
    compensated_peaks(releases, mode)
        .into_iter()
        .filter(|(_, peak)| *peak > 1.0)
        .collect()
}

/// Upload backlog for one channel.
///
/// # Errors
/// Returns `LibraryError::UploadStateDamaged` when more than one release on
/// the channel has a link but no id: the upload layer guarantees at most one
/// upload is ever in flight, so a second one means the snapshot was damaged.
pub fn upload_queue(
    releases: &IndexMap<String, Release>,
    channel: UploadChannel,
) -> Result<UploadQueue> {
    let mut queue = UploadQueue::default();
    for (release_path, release) in releases {
        let (id, link) = match channel {
            UploadChannel::Original => (
                &release.uploads.upload_id_original,
                &release.uploads.upload_link_original,
            ),
            UploadChannel::Alt => (
                &release.uploads.upload_id_alt,
                &release.uploads.upload_link_alt,
            ),
        };
        if id.is_some() {
            continue;
        }
        if link.is_some() {
            if let Some(ref first) = queue.in_flight {
                return Err(LibraryError::upload_state(format!(
                    "two in-flight uploads on one channel: '{first}' and '{release_path}'"
                )));
            }
            queue.in_flight = Some(release_path.clone());
        } else {
            queue.pending.push(release_path.clone());
        }
    }
    Ok(queue)
}

/// Releases whose first track carries embedded artwork
pub fn releases_with_embedded_artwork(releases: &IndexMap<String, Release>) -> Vec<String> {
    releases
        .iter()
        .filter(|(_, release)| {
            release
                .tracks
                .values()
                .next()
                .is_some_and(|track| track.embedded_artwork)
        })
        .map(|(path, _)| path.clone())
        .collect()
}

/// Releases shipping at least one external image file
pub fn releases_with_external_artwork(releases: &IndexMap<String, Release>) -> Vec<String> {
    releases
        .iter()
        .filter(|(_, release)| !release.images.is_empty())
        .map(|(path, _)| path.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{TRACK_GAIN_TAG, TRACK_PEAK_TAG};
    use tonearm_core::types::Track;

    fn track(tags: &[(&str, &str)]) -> Track {
        let mut track = Track::new(0);
        for (key, value) in tags {
            track
                .tags
                .insert((*key).to_string(), vec![(*value).to_string()]);
        }
        track
    }

    fn one_release(tracks: Vec<(&str, Track)>) -> IndexMap<String, Release> {
        let mut release = Release::default();
        for (name, t) in tracks {
            release.tracks.insert(name.to_string(), t);
        }
        let mut releases = IndexMap::new();
        releases.insert("A".to_string(), release);
        releases
    }

    #[test]
    fn lacking_tag_lists_full_track_paths() {
        let releases = one_release(vec![
            ("01.flac", track(&[("title", "x")])),
            ("02.flac", track(&[])),
        ]);
        let found = tracks_lacking_tag(&releases, "title");
        assert_eq!(found.len(), 1);
        assert_eq!(found["A"], vec!["A/02.flac".to_string()]);
    }

    #[test]
    fn mixed_extensions_detected_case_insensitively() {
        let releases = one_release(vec![
            ("01.flac", track(&[])),
            ("02.FLAC", track(&[])),
        ]);
        assert!(multi_extension_releases(&releases).is_empty());

        let releases = one_release(vec![
            ("01.flac", track(&[])),
            ("02.mp3", track(&[])),
        ]);
        assert_eq!(multi_extension_releases(&releases), vec!["A".to_string()]);
    }

    #[test]
    fn inconsistent_tag_uses_first_values() {
        let releases = one_release(vec![
            ("01.flac", track(&[("album", "X")])),
            ("02.flac", track(&[("album", "Y")])),
        ]);
        assert_eq!(
            inconsistent_tag_releases(&releases, "album"),
            vec!["A".to_string()]
        );
        assert!(inconsistent_tag_releases(&releases, "artist").is_empty());
    }

    #[test]
    fn peaks_sorted_ascending_and_clipping_filtered() {
        let releases = one_release(vec![
            (
                "loud.flac",
                track(&[(TRACK_PEAK_TAG, "0.9"), (TRACK_GAIN_TAG, "6 dB")]),
            ),
            (
                "quiet.flac",
                track(&[(TRACK_PEAK_TAG, "0.2"), (TRACK_GAIN_TAG, "0 dB")]),
            ),
            ("untagged.flac", track(&[])),
        ]);

        let peaks = compensated_peaks(&releases, GainMode::Track);
        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks[0].0, "A/quiet.flac");
        assert!(peaks[0].1 < peaks[1].1);

        let clipping = clipping_tracks(&releases, GainMode::Track);
        assert_eq!(clipping.len(), 1);
        assert_eq!(clipping[0].0, "A/loud.flac");
    }

    #[test]
    fn upload_queue_tracks_pending_and_in_flight() {
        let mut releases = IndexMap::new();

        let mut done = Release::default();
        done.uploads.upload_id_original = Some("msg:1".to_string());
        releases.insert("Done".to_string(), done);

        let mut in_flight = Release::default();
        in_flight.uploads.upload_link_original = Some("t.me/x".to_string());
        releases.insert("InFlight".to_string(), in_flight);

        releases.insert("Pending".to_string(), Release::default());

        let queue = upload_queue(&releases, UploadChannel::Original).unwrap();
        assert_eq!(queue.in_flight.as_deref(), Some("InFlight"));
        assert_eq!(queue.pending, vec!["Pending".to_string()]);

        // the original channel's state must not leak into the alternate one
        let alt = upload_queue(&releases, UploadChannel::Alt).unwrap();
        assert!(alt.in_flight.is_none());
        assert_eq!(alt.pending.len(), 3);
    }

    #[test]
    fn two_in_flight_uploads_are_fatal() {
        let mut releases = IndexMap::new();
        for name in ["A", "B"] {
            let mut release = Release::default();
            release.uploads.upload_link_alt = Some("t.me/x".to_string());
            releases.insert(name.to_string(), release);
        }

        let err = upload_queue(&releases, UploadChannel::Alt).unwrap_err();
        assert!(matches!(err, LibraryError::UploadStateDamaged(_)));
    }
}
