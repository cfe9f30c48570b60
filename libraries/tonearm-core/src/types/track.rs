/// Track domain type
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Multi-valued tag map, ordered by natural key sort at construction time
pub type TagMap = IndexMap<String, Vec<String>>;

/// References attached by the external upload layer after a successful
/// upload. Two delivery channels exist: the original files and the
/// transcoded alternate. The scanning core treats all four fields as opaque
/// pass-through data and excludes them from move-equality comparisons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRefs {
    /// Upload identifier on the original channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_id_original: Option<String>,

    /// Announcement link on the original channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_link_original: Option<String>,

    /// Upload identifier on the alternate channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_id_alt: Option<String>,

    /// Announcement link on the alternate channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_link_alt: Option<String>,
}

impl UploadRefs {
    /// True when no upload reference is attached
    pub fn is_empty(&self) -> bool {
        self.upload_id_original.is_none()
            && self.upload_link_original.is_none()
            && self.upload_id_alt.is_none()
            && self.upload_link_alt.is_none()
    }

    /// Drop all attached references
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// One audio file inside a release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Filesystem modification time (Unix seconds); the authoritative
    /// cheap change signal
    pub mtime: i64,

    /// Bits per sample
    pub depth: u32,

    /// Sample rate in Hz
    pub rate: u32,

    /// Duration in seconds
    pub length: f64,

    /// Total sample count
    pub samples: u64,

    /// Tag map, keys natural-sorted, numbering tags already split
    pub tags: TagMap,

    /// Whether the file carries embedded artwork
    pub embedded_artwork: bool,

    /// Opaque upload references, absent until the upload layer attaches them
    #[serde(flatten)]
    pub uploads: UploadRefs,
}

/// Bit depth assumed when the container does not report one
pub(crate) const DEFAULT_DEPTH: u32 = 16;

/// Sample rate assumed when the container does not report one
pub(crate) const DEFAULT_RATE: u32 = 44100;

impl Track {
    /// Create a track with default audio properties and empty tags
    pub fn new(mtime: i64) -> Self {
        Self {
            mtime,
            depth: DEFAULT_DEPTH,
            rate: DEFAULT_RATE,
            length: 0.0,
            samples: 0,
            tags: TagMap::new(),
            embedded_artwork: false,
            uploads: UploadRefs::default(),
        }
    }

    /// First value of a tag, if present
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
