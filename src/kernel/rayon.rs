//! Row-parallel driver (feature-gated).
//!
//! Output rows are disjoint chunks of the response buffer, so each rayon task
//! owns the cells it writes and no synchronization is needed.

use crate::image::ImageView;
use crate::kernel::scalar::correlate_row;
use crate::kernel::Kernel;
use crate::template::TemplatePlan;
use crate::util::NccResult;
use rayon::prelude::*;

/// Fills `out` (row-major, `width` columns) with scores, one task per row.
///
/// Returns the number of zero-variance windows.
pub(crate) fn correlate_rows_par<K: Kernel>(
    padded: ImageView<'_, u8>,
    tpl: &TemplatePlan,
    width: usize,
    out: &mut [f32],
) -> NccResult<usize> {
    let per_row: Vec<usize> = out
        .par_chunks_mut(width)
        .enumerate()
        .map(|(y, row)| correlate_row::<K>(padded, tpl, y, row))
        .collect::<NccResult<_>>()?;
    Ok(per_row.into_iter().sum())
}
