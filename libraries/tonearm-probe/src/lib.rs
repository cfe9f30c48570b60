//! Tonearm Probe
//!
//! External-collaborator implementations for the scanning core:
//! - Tag/media probing via lofty (MP3, FLAC, OGG, OPUS, APE, MP4, WMA, ...)
//! - Image validation via the image crate (header-level check)
//!
//! The scanning core only depends on the `MediaProber` / `ImageValidator`
//! traits from `tonearm-core`; this crate provides the production
//! implementations.
//!
//! # Example
//!
//! ```rust,no_run
//! use tonearm_core::MediaProber;
//! use tonearm_probe::LoftyProber;
//! use std::path::Path;
//!
//! # fn example() -> tonearm_core::Result<()> {
//! let prober = LoftyProber::new();
//! if let Some(descriptor) = prober.probe(Path::new("/music/song.flac"))? {
//!     println!("{} Hz", descriptor.sample_rate.unwrap_or(44100));
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod image_check;
mod prober;

pub use error::{ProbeError, Result};
pub use image_check::StandardImageValidator;
pub use prober::LoftyProber;
