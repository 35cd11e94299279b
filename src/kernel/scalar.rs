//! Scalar kernels and the sequential row driver.

use crate::image::ImageView;
use crate::kernel::Kernel;
use crate::normalize::standardize_with_norm;
use crate::template::TemplatePlan;
use crate::util::{NccError, NccResult};

/// Reference kernel: copies the window, standardizes it and takes the dot
/// product with the standardized template.
///
/// Both kernels score a constant template by intensity agreement, see
/// [`TemplatePlan::flat_score`].
pub struct Direct;

/// Moment kernel: accumulates the window sum and sum of squares in integers
/// and dots the raw window with the standardized template.
///
/// Because the standardized template sums to zero, the window mean cancels
/// out of the dot product and only the window norm has to be divided out.
pub struct Moments;

impl Kernel for Direct {
    fn score_at(
        padded: ImageView<'_, u8>,
        tpl: &TemplatePlan,
        x: usize,
        y: usize,
    ) -> NccResult<Option<f64>> {
        let window = padded.roi(x, y, tpl.width(), tpl.height())?.to_vec();
        if tpl.is_degenerate() {
            let sum: f64 = window.iter().map(|&v| v as f64).sum();
            return Ok(Some(tpl.flat_score(sum / window.len() as f64)));
        }
        let (patch, norm) = standardize_with_norm(&window)?;
        if norm == 0.0 {
            return Ok(None);
        }
        let dot = patch
            .iter()
            .zip(tpl.standardized())
            .map(|(p, t)| p * t)
            .sum();
        Ok(Some(dot))
    }
}

impl Kernel for Moments {
    fn score_at(
        padded: ImageView<'_, u8>,
        tpl: &TemplatePlan,
        x: usize,
        y: usize,
    ) -> NccResult<Option<f64>> {
        let tpl_width = tpl.width();
        let tpl_height = tpl.height();
        let t = tpl.standardized();
        let out_of_bounds = || NccError::InvalidDimensions {
            width: tpl_width,
            height: tpl_height,
        };

        let mut sum = 0u64;
        let mut sum_sq = 0u64;
        let mut dot = 0.0f64;
        for ty in 0..tpl_height {
            let row = padded
                .row(y + ty)
                .and_then(|row| row.get(x..x + tpl_width))
                .ok_or_else(out_of_bounds)?;
            let base = ty * tpl_width;
            for (tx, &value) in row.iter().enumerate() {
                let v = value as u64;
                sum += v;
                sum_sq += v * v;
                dot += t[base + tx] * value as f64;
            }
        }

        if tpl.is_degenerate() {
            return Ok(Some(tpl.flat_score(sum as f64 / tpl.len() as f64)));
        }

        // n * sum(v^2) - sum(v)^2 == n^2 * variance, exact for u8 input.
        let n = tpl.len() as u128;
        let var_num = n * sum_sq as u128 - (sum as u128) * (sum as u128);
        if var_num == 0 {
            return Ok(None);
        }
        let norm = (var_num as f64 / n as f64).sqrt();
        Ok(Some(dot / norm))
    }
}

/// Scores every placement of output row `y` into `out`.
///
/// Returns the number of zero-variance windows scored against a textured
/// template; those score 0.
pub(crate) fn correlate_row<K: Kernel>(
    padded: ImageView<'_, u8>,
    tpl: &TemplatePlan,
    y: usize,
    out: &mut [f32],
) -> NccResult<usize> {
    let mut degenerate = 0usize;
    for (x, cell) in out.iter_mut().enumerate() {
        *cell = match K::score_at(padded, tpl, x, y)? {
            Some(score) if score.is_finite() => score as f32,
            _ => {
                degenerate += 1;
                0.0
            }
        };
    }
    Ok(degenerate)
}

/// Sequentially fills `out` (row-major, `width` columns) with scores.
pub(crate) fn correlate_rows<K: Kernel>(
    padded: ImageView<'_, u8>,
    tpl: &TemplatePlan,
    width: usize,
    out: &mut [f32],
) -> NccResult<usize> {
    let mut degenerate = 0usize;
    for (y, row) in out.chunks_mut(width).enumerate() {
        degenerate += correlate_row::<K>(padded, tpl, y, row)?;
    }
    Ok(degenerate)
}
