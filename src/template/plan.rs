//! Standardized template, computed once per correlator.

use crate::image::ImageView;
use crate::normalize::standardize_with_norm;
use crate::trace::trace_event;
use crate::util::NccResult;

/// Zero-mean, unit-norm template buffer plus its source statistics.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    mean: f64,
    norm: f64,
    standardized: Vec<f64>,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    ///
    /// A constant template standardizes to all zeros; the plan is still
    /// valid, reports itself as degenerate and is scored with
    /// [`TemplatePlan::flat_score`].
    pub fn from_view(tpl: ImageView<'_, u8>) -> NccResult<Self> {
        let pixels = tpl.to_vec();
        let mean = pixels.iter().map(|&v| v as f64).sum::<f64>() / pixels.len() as f64;
        let (standardized, norm) = standardize_with_norm(&pixels)?;

        trace_event!(
            "template_plan",
            width = tpl.width(),
            height = tpl.height(),
            degenerate = norm == 0.0
        );

        Ok(Self {
            width: tpl.width(),
            height: tpl.height(),
            mean,
            norm,
            standardized,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of template pixels.
    pub fn len(&self) -> usize {
        self.standardized.len()
    }

    /// Always false; templates have at least one pixel.
    pub fn is_empty(&self) -> bool {
        self.standardized.is_empty()
    }

    /// Returns the mean intensity of the template.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the L2 norm of the mean-subtracted template (0 when degenerate).
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// True when the template has zero variance.
    pub fn is_degenerate(&self) -> bool {
        self.norm == 0.0
    }

    /// Scores a window against a constant template by intensity agreement:
    /// `1 - |window_mean - mean| / 255`, in `[0, 1]` for `u8` windows.
    pub fn flat_score(&self, window_mean: f64) -> f64 {
        1.0 - (window_mean - self.mean).abs() / 255.0
    }

    /// Returns the standardized template in row-major order.
    pub fn standardized(&self) -> &[f64] {
        &self.standardized
    }
}
