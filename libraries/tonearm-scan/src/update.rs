/// The differencing engine: incremental snapshot synchronization
use crate::discovery::discover_releases;
use crate::progress::{ProgressCallback, UpdateProgress};
use crate::scanner::{scan_mtimes, ReleaseScanner};
use indexmap::IndexMap;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tonearm_core::types::{LibraryDb, Release};
use tonearm_core::{ImageValidator, LibraryError, MediaProber, Result};

/// What an update run found, with the *pre-update* release snapshots so the
/// caller can audit or back them up
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateReport {
    /// Releases removed from the snapshot (not resolved as moves)
    pub deleted: IndexMap<String, Release>,

    /// Releases whose entry was replaced by a fresh scan, keyed by path,
    /// holding the previous snapshot data
    pub modified: IndexMap<String, Release>,

    /// Resolved moves as (old path, new path) pairs
    pub moved: Vec<(String, String)>,
}

/// Synchronizes a `LibraryDb` with the filesystem.
///
/// Scanning of changed and new releases fans out over the rayon pool;
/// move detection and the final merge run on the calling thread against the
/// completed scan results, so every deleted candidate is resolved against a
/// globally consistent view.
pub struct LibraryUpdater<'a> {
    prober: &'a dyn MediaProber,
    validator: &'a dyn ImageValidator,
    trust_mtime: bool,
    critical_tags: Vec<String>,
    wanted_tags: Vec<String>,
    progress: Option<ProgressCallback>,
}

impl<'a> LibraryUpdater<'a> {
    /// Create an updater over the given collaborators
    pub fn new(prober: &'a dyn MediaProber, validator: &'a dyn ImageValidator) -> Self {
        Self {
            prober,
            validator,
            trust_mtime: true,
            critical_tags: Vec::new(),
            wanted_tags: Vec::new(),
            progress: None,
        }
    }

    /// Whether unchanged mtimes are proof of an unchanged release
    /// (default: true). When false, every existing release is fully
    /// re-scanned and compared by content.
    pub fn trust_mtime(mut self, trust: bool) -> Self {
        self.trust_mtime = trust;
        self
    }

    /// Tags whose absence counts into the "critical" statistics bucket
    pub fn critical_tags(mut self, tags: Vec<String>) -> Self {
        self.critical_tags = tags;
        self
    }

    /// Tags whose absence counts into the "wanted" statistics bucket
    pub fn wanted_tags(mut self, tags: Vec<String>) -> Self {
        self.wanted_tags = tags;
        self
    }

    /// Set progress callback
    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    fn report(&self, event: &UpdateProgress) {
        if let Some(ref callback) = self.progress {
            callback(event);
        }
    }

    /// Synchronize `db` with the filesystem under `db.root`.
    ///
    /// Computes the new/deleted/changed split, re-scans what needs it,
    /// resolves single-match moves so upload references survive renames,
    /// merges atomically, and recomputes statistics. The returned report
    /// holds the pre-update snapshots of everything that changed.
    ///
    /// # Errors
    /// Fails fast when `db.root` is not a directory. Per-release scan
    /// failures are logged and skipped for this run; they do not abort the
    /// update.
    pub fn update(&self, db: &mut LibraryDb) -> Result<UpdateReport> {
        if !db.root.is_dir() {
            return Err(LibraryError::InvalidRoot(db.root.clone()));
        }

        self.report(&UpdateProgress::DiscoveringReleases);
        let current = discover_releases(&db.root)?;
        let current_set: HashSet<&str> = current.iter().map(String::as_str).collect();
        let old_set: HashSet<String> = db.releases.keys().cloned().collect();

        let new_paths: Vec<String> = current
            .iter()
            .filter(|path| !old_set.contains(path.as_str()))
            .cloned()
            .collect();
        let changed_candidates: Vec<String> = current
            .iter()
            .filter(|path| old_set.contains(path.as_str()))
            .cloned()
            .collect();
        let deleted_candidates: Vec<String> = db
            .releases
            .keys()
            .filter(|path| !current_set.contains(path.as_str()))
            .cloned()
            .collect();

        let scanner = ReleaseScanner::new(self.prober, self.validator);

        // Fan out over the changed candidates; each worker reads the old
        // snapshot immutably and produces a fresh scan only when the
        // release actually changed.
        let scanned = AtomicUsize::new(0);
        let total = changed_candidates.len();
        let rescans: Vec<(String, Release)> = changed_candidates
            .par_iter()
            .filter_map(|path| {
                let outcome = self.rescan_if_changed(db, path, &scanner);
                let done = scanned.fetch_add(1, Ordering::Relaxed) + 1;
                self.report(&UpdateProgress::ScanningExisting {
                    release: path.clone(),
                    scanned: done,
                    total,
                });
                match outcome {
                    Ok(Some(fresh)) => Some((path.clone(), fresh)),
                    Ok(None) => None,
                    Err(e) => {
                        tracing::warn!("skipping release '{path}' this run: {e}");
                        None
                    }
                }
            })
            .collect();

        let scanned = AtomicUsize::new(0);
        let total = new_paths.len();
        let mut new_scans: IndexMap<String, Release> = new_paths
            .par_iter()
            .filter_map(|path| {
                let outcome = scanner.scan(&db.root.join(path));
                let done = scanned.fetch_add(1, Ordering::Relaxed) + 1;
                self.report(&UpdateProgress::ScanningNew {
                    release: path.clone(),
                    scanned: done,
                    total,
                });
                match outcome {
                    Ok(release) => Some((path.clone(), release)),
                    Err(e) => {
                        tracing::warn!("skipping new release '{path}' this run: {e}");
                        None
                    }
                }
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect();

        // All scan data is final from here on; apply it on this thread.
        let mut report = UpdateReport::default();

        for (path, fresh) in rescans {
            if let Some(previous) = db.releases.insert(path.clone(), fresh) {
                report.modified.insert(path, previous);
            }
        }

        self.report(&UpdateProgress::ResolvingMoves);
        for path in deleted_candidates {
            match self.find_move_target(&db.releases[&path], &new_scans) {
                Some(target) => {
                    // Keep the old stored data, upload references included,
                    // under the new path; the fresh scan is discarded.
                    if let Some(stored) = db.releases.shift_remove(&path) {
                        db.releases.insert(target.clone(), stored);
                    }
                    new_scans.shift_remove(&target);
                    tracing::info!("moved '{path}' to '{target}'");
                    report.moved.push((path, target));
                }
                None => {
                    if let Some(stored) = db.releases.shift_remove(&path) {
                        report.deleted.insert(path, stored);
                    }
                }
            }
        }

        for (path, release) in new_scans {
            db.releases.insert(path, release);
        }

        self.report(&UpdateProgress::ComputingStatistics);
        db.statistics =
            tonearm_stats::calc_stats(&db.releases, &self.critical_tags, &self.wanted_tags);
        db.update_time = chrono::Utc::now().timestamp();

        tracing::info!(
            "update complete: {} modified, {} deleted, {} moved, {} total releases",
            report.modified.len(),
            report.deleted.len(),
            report.moved.len(),
            db.releases.len()
        );
        Ok(report)
    }

    /// Decide whether an existing release changed and, if so, return the
    /// fresh full scan
    fn rescan_if_changed(
        &self,
        db: &LibraryDb,
        path: &str,
        scanner: &ReleaseScanner<'_>,
    ) -> Result<Option<Release>> {
        let dir = db.root.join(path);
        let previous = &db.releases[path];

        if self.trust_mtime {
            if scan_mtimes(&dir)? == previous.file_mtimes() {
                return Ok(None);
            }
            return Ok(Some(scanner.scan(&dir)?));
        }

        let fresh = scanner.scan(&dir)?;
        if fresh.content_eq(previous) {
            Ok(None)
        } else {
            Ok(Some(fresh))
        }
    }

    /// The single new path whose scan is structurally equal to `previous`,
    /// if exactly one exists. Several equally valid candidates mean the
    /// move is not resolved: guessing wrong would attach upload references
    /// to the wrong directory.
    fn find_move_target(
        &self,
        previous: &Release,
        new_scans: &IndexMap<String, Release>,
    ) -> Option<String> {
        let mut matches = new_scans
            .iter()
            .filter(|(_, fresh)| fresh.content_eq(previous))
            .map(|(path, _)| path);

        let first = matches.next()?;
        if let Some(second) = matches.next() {
            tracing::warn!(
                "ambiguous move: '{first}' and '{second}' both match; treating as delete + add"
            );
            return None;
        }
        Some(first.clone())
    }
}
