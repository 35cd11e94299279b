//! Per-window scoring kernels and row drivers.
//!
//! A kernel scores one template placement inside the padded image. The row
//! drivers in [`scalar`] and (with the `rayon` feature) [`rayon`] apply a
//! kernel to every placement and write one score per output cell.

use crate::image::ImageView;
use crate::template::TemplatePlan;
use crate::util::NccResult;

/// Scores a single template placement.
pub trait Kernel {
    /// Returns the normalized cross-correlation of the standardized template
    /// with the window whose top-left corner is `(x, y)` in `padded`.
    ///
    /// `Ok(None)` means the window has zero variance.
    fn score_at(
        padded: ImageView<'_, u8>,
        tpl: &TemplatePlan,
        x: usize,
        y: usize,
    ) -> NccResult<Option<f64>>;
}

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

pub use scalar::{Direct, Moments};
