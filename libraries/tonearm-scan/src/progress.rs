/// Progress reporting for library updates
///
/// Events are purely informational (UI feedback); dropping them has no
/// semantic effect on the update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateProgress {
    /// Walking the library root for release directories
    DiscoveringReleases,

    /// Re-scanning a release that existed in the previous snapshot
    ScanningExisting {
        /// Release path relative to the library root
        release: String,
        /// Releases finished so far
        scanned: usize,
        /// Total releases to check
        total: usize,
    },

    /// Scanning a newly discovered release
    ScanningNew {
        /// Release path relative to the library root
        release: String,
        /// Releases finished so far
        scanned: usize,
        /// Total new releases
        total: usize,
    },

    /// Matching deleted candidates against new scans
    ResolvingMoves,

    /// Recomputing the statistics blob
    ComputingStatistics,
}

/// Callback for update progress events
pub type ProgressCallback = Box<dyn Fn(&UpdateProgress) + Send + Sync>;
