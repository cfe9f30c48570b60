/// Image validation implementation using the image crate
use image::ImageReader;
use std::path::Path;
use tonearm_core::ImageValidator;

/// Validator that accepts anything the image crate can identify.
///
/// Only the header is inspected (format sniffing plus dimension read); the
/// pixel data is never decoded, so oversized scans in a personal library do
/// not slow the pipeline down.
pub struct StandardImageValidator;

impl StandardImageValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }
}

impl Default for StandardImageValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageValidator for StandardImageValidator {
    fn is_valid_image(&self, path: &Path) -> bool {
        ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map(|reader| reader.into_dimensions().is_ok())
            .unwrap_or(false)
    }
}
