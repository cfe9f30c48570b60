//! Scanning behavior against real directories
mod common;

use common::{write_file, ExtensionImageValidator, TextProber};
use std::path::Path;
use tempfile::TempDir;
use tonearm_core::{AudioDescriptor, MediaProber, Result, TagMap};
use tonearm_scan::{discover_releases, scan_mtimes, ReleaseScanner};

fn scan(dir: &Path) -> tonearm_core::Release {
    ReleaseScanner::new(&TextProber, &ExtensionImageValidator)
        .scan(dir)
        .unwrap()
}

#[test]
fn classifies_tracks_images_and_files() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp.path().join("01.flac"), "title=One", 100);
    write_file(&tmp.path().join("cover.jpg"), "", 101);
    write_file(&tmp.path().join("rip.log"), "EAC log", 102);

    let release = scan(tmp.path());
    assert_eq!(release.tracks.len(), 1);
    assert_eq!(release.images.len(), 1);
    assert_eq!(release.files.len(), 1);
    assert_eq!(release.tracks["01.flac"].mtime, 100);
    assert_eq!(release.tracks["01.flac"].tag("title"), Some("One"));
    assert_eq!(release.images["cover.jpg"].mtime, 101);
    assert_eq!(release.files["rip.log"].mtime, 102);
}

#[test]
fn entries_come_out_in_natural_order() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp.path().join("10.flac"), "title=Ten", 1);
    write_file(&tmp.path().join("2.flac"), "title=Two", 1);
    write_file(&tmp.path().join("1.flac"), "title=One", 1);

    let release = scan(tmp.path());
    let names: Vec<&str> = release.tracks.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["1.flac", "2.flac", "10.flac"]);
}

#[test]
fn numbering_tags_are_split_during_scan() {
    let tmp = TempDir::new().unwrap();
    write_file(
        &tmp.path().join("01.flac"),
        "tracknumber=1/10\ndiscnumber=1",
        1,
    );

    let release = scan(tmp.path());
    let track = &release.tracks["01.flac"];
    assert_eq!(track.tags["tracknumber"], vec!["1"]);
    assert_eq!(track.tags["totaltracks"], vec!["10"]);
    assert_eq!(track.tags["discnumber"], vec!["1"]);
    assert!(!track.tags.contains_key("totaldiscs"));
}

#[test]
fn embedded_artwork_flag_is_lifted_out_of_tags() {
    let tmp = TempDir::new().unwrap();
    write_file(
        &tmp.path().join("01.flac"),
        "title=One\nembedded_artwork=yes",
        1,
    );

    let release = scan(tmp.path());
    let track = &release.tracks["01.flac"];
    assert!(track.embedded_artwork);
    assert!(!track.tags.contains_key("embedded_artwork"));
}

#[test]
fn mtime_scan_matches_full_scan() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp.path().join("01.flac"), "title=One", 100);
    write_file(&tmp.path().join("cover.jpg"), "", 200);
    write_file(&tmp.path().join("notes.txt"), "", 300);

    let release = scan(tmp.path());
    assert_eq!(scan_mtimes(tmp.path()).unwrap(), release.file_mtimes());
}

#[test]
fn subdirectories_are_not_release_entries() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp.path().join("01.flac"), "title=One", 1);
    write_file(&tmp.path().join("Scans/front.jpg"), "", 1);

    let release = scan(tmp.path());
    assert_eq!(release.file_mtimes().len(), 1);
    assert!(release.tracks.contains_key("01.flac"));
}

/// Claims every file is audio; exercises the probe-bypass extension list
struct PromiscuousProber;

impl MediaProber for PromiscuousProber {
    fn probe(&self, _path: &Path) -> Result<Option<AudioDescriptor>> {
        Ok(Some(AudioDescriptor {
            bits_per_sample: None,
            sample_rate: None,
            total_samples: None,
            duration_seconds: 1.0,
            tags: TagMap::new(),
            has_embedded_artwork: false,
        }))
    }
}

#[test]
fn bypass_extensions_never_reach_the_prober() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp.path().join("theme.mid"), "", 1);
    write_file(&tmp.path().join("clip.mov"), "", 1);
    write_file(&tmp.path().join("art.webp"), "", 1);
    write_file(&tmp.path().join("01.flac"), "", 1);

    let release = ReleaseScanner::new(&PromiscuousProber, &ExtensionImageValidator)
        .scan(tmp.path())
        .unwrap();
    assert_eq!(release.tracks.len(), 1);
    assert!(release.tracks.contains_key("01.flac"));
    assert_eq!(release.files.len(), 3);
}

#[cfg(unix)]
#[test]
fn unreadable_entry_is_kept_as_an_opaque_file() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp.path().join("01.flac"), "title=One", 1);
    std::os::unix::fs::symlink("missing-target", tmp.path().join("ghost.flac")).unwrap();

    let release = scan(tmp.path());
    assert_eq!(release.tracks.len(), 1);
    assert_eq!(release.files["ghost.flac"].mtime, 0);
}

#[test]
fn discovery_finds_immediate_parents_only() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp.path().join("Artist/Album/01.flac"), "", 1);
    write_file(&tmp.path().join("Artist/Album/cover.jpg"), "", 1);
    write_file(&tmp.path().join("Box Set/CD1/01.flac"), "", 1);
    write_file(&tmp.path().join("Box Set/CD2/01.flac"), "", 1);
    write_file(&tmp.path().join("Box Set/booklet.pdf"), "", 1);
    write_file(&tmp.path().join("Empty/readme.txt"), "", 1);

    let releases = discover_releases(tmp.path()).unwrap();
    assert_eq!(
        releases,
        vec!["Artist/Album", "Box Set/CD1", "Box Set/CD2"]
    );
}

#[test]
fn audio_at_the_root_yields_the_dot_release() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp.path().join("loose.mp3"), "", 1);
    write_file(&tmp.path().join("Artist/Album/01.flac"), "", 1);

    let releases = discover_releases(tmp.path()).unwrap();
    assert_eq!(releases, vec![".", "Artist/Album"]);
}

#[test]
fn discovery_order_is_natural() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp.path().join("Vol 10/01.flac"), "", 1);
    write_file(&tmp.path().join("Vol 2/01.flac"), "", 1);
    write_file(&tmp.path().join("vol 1/01.flac"), "", 1);

    let releases = discover_releases(tmp.path()).unwrap();
    assert_eq!(releases, vec!["vol 1", "Vol 2", "Vol 10"]);
}
