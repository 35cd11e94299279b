//! Error types for ncc2d.

use thiserror::Error;

/// Result alias for ncc2d operations.
pub type NccResult<T> = std::result::Result<T, NccError>;

/// Errors that can occur when building inputs or running the correlation.
///
/// Degenerate (zero-variance) templates and patches, and constant response
/// maps, are not errors: they resolve to deterministic fallback values.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NccError {
    /// Width or height is zero, or the element count overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is shorter than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is shorter than the view requires.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Template is not strictly smaller than the image along both axes.
    #[error(
        "template {template_width}x{template_height} must be strictly smaller than \
         image {image_width}x{image_height} in both dimensions"
    )]
    InvalidTemplateSize {
        template_width: usize,
        template_height: usize,
        image_width: usize,
        image_height: usize,
    },
    /// A numeric transform was given no elements.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),
    /// Decoding, encoding or writing an image failed.
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
}
