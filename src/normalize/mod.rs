//! Array normalization: standardization, min-max rescaling and quantization.

use crate::util::{NccError, NccResult};

/// Norm at or below which a mean-subtracted array counts as constant.
pub const MIN_NORM: f64 = 1e-12;

/// Value written for every element when `rescale` sees a constant range.
pub const RESCALE_FALLBACK: f32 = 0.5;

/// Subtracts the mean and divides by the L2 norm of the centered values.
///
/// The result has zero mean and unit L2 norm. A constant input (centered
/// norm at most [`MIN_NORM`]) yields all zeros so no non-finite value leaves
/// this function.
pub fn standardize<T: Copy + Into<f64>>(values: &[T]) -> NccResult<Vec<f64>> {
    let (out, _) = standardize_with_norm(values)?;
    Ok(out)
}

/// Like [`standardize`], also returning the centered norm (0 when degenerate).
pub(crate) fn standardize_with_norm<T: Copy + Into<f64>>(
    values: &[T],
) -> NccResult<(Vec<f64>, f64)> {
    if values.is_empty() {
        return Err(NccError::EmptyInput("standardize needs at least one element"));
    }

    let count = values.len() as f64;
    let mean = values.iter().map(|&v| v.into()).sum::<f64>() / count;
    let mut centered: Vec<f64> = values.iter().map(|&v| v.into() - mean).collect();
    let norm = centered.iter().map(|v| v * v).sum::<f64>().sqrt();

    if !norm.is_finite() || norm <= MIN_NORM {
        centered.fill(0.0);
        return Ok((centered, 0.0));
    }

    let inv_norm = 1.0 / norm;
    for v in &mut centered {
        *v *= inv_norm;
    }
    Ok((centered, norm))
}

/// Min-max rescales `values` to `[0, 1]`.
///
/// The range is taken over finite elements only. When there is no finite
/// element or the range is empty, every output is [`RESCALE_FALLBACK`].
/// Non-finite inputs map to 1 (`+inf`), 0 (`-inf`) or the fallback (`NaN`).
pub fn rescale(values: &[f32]) -> NccResult<Vec<f32>> {
    if values.is_empty() {
        return Err(NccError::EmptyInput("rescale needs at least one element"));
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter().filter(|v| v.is_finite()) {
        min = min.min(v as f64);
        max = max.max(v as f64);
    }

    let range = max - min;
    if range <= 0.0 {
        crate::trace::trace_event!("rescale_fallback", len = values.len());
        return Ok(vec![RESCALE_FALLBACK; values.len()]);
    }

    let inv_range = 1.0 / range;
    Ok(values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                RESCALE_FALLBACK
            } else if v == f32::INFINITY {
                1.0
            } else if v == f32::NEG_INFINITY {
                0.0
            } else {
                ((v as f64 - min) * inv_range) as f32
            }
        })
        .collect())
}

/// Maps `[0, 1]` values to 8-bit intensities with `round(v * 255)`.
///
/// Values outside the range are clamped; `NaN` becomes mid-gray.
pub fn quantize_u8(values: &[f32]) -> Vec<u8> {
    values
        .iter()
        .map(|&v| {
            let v = if v.is_nan() { RESCALE_FALLBACK } else { v };
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        })
        .collect()
}
