//! Tonearm Stats
//!
//! Derived statistics over a library snapshot:
//! - the aggregator that recomputes `Statistics` after every update
//! - read-only queries (missing tags, mixed extensions, clipping prediction,
//!   upload queues) over an immutable snapshot
//!
//! Everything here is a pure function of the release map; nothing in this
//! crate mutates a snapshot except through the value returned by
//! [`calc_stats`].

#![forbid(unsafe_code)]

mod aggregate;
pub mod queries;

pub use aggregate::{
    album_peak, calc_stats, compensated_peak, db_gain, track_peak, ALBUM_GAIN_TAG, ALBUM_PEAK_TAG,
    TRACK_GAIN_TAG, TRACK_PEAK_TAG,
};
