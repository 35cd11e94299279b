//! Correlation response maps.

use crate::image::checked_area;
use crate::normalize::{quantize_u8, rescale};
use crate::util::{NccError, NccResult};

/// Minimum and maximum of a response map with their first locations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extremes {
    /// Smallest score.
    pub min_value: f32,
    /// Largest score.
    pub max_value: f32,
    /// `(x, y)` of the first occurrence of `min_value` in row-major order.
    pub min_location: (usize, usize),
    /// `(x, y)` of the first occurrence of `max_value` in row-major order.
    pub max_location: (usize, usize),
}

/// Per-pixel similarity scores, same size as the correlated image.
///
/// The score at `(x, y)` compares the template against the image window
/// whose top-left corner sits at `(x - pad_w.before, y - pad_h.before)` in
/// source coordinates, i.e. the template centered on `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseMap {
    data: Vec<f32>,
    width: usize,
    height: usize,
    degenerate_template: bool,
    degenerate_patches: usize,
}

impl ResponseMap {
    /// Wraps a row-major score buffer of exactly `width * height` values.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> NccResult<Self> {
        let needed = checked_area(width, height)?;
        if data.len() != needed {
            return Err(NccError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            degenerate_template: false,
            degenerate_patches: 0,
        })
    }

    pub(crate) fn with_degeneracy(mut self, template: bool, patches: usize) -> Self {
        self.degenerate_template = template;
        self.degenerate_patches = patches;
        self
    }

    /// Returns the map width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the map height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major scores.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the score at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns row `y` of the map.
    pub fn row(&self, y: usize) -> Option<&[f32]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }

    /// True when the template had zero variance and windows were scored by
    /// mean intensity agreement instead of correlation.
    pub fn degenerate_template(&self) -> bool {
        self.degenerate_template
    }

    /// Number of zero-variance windows scored against a textured template;
    /// their score falls back to 0.
    pub fn degenerate_patches(&self) -> usize {
        self.degenerate_patches
    }

    /// Finds the minimum and maximum scores, ignoring non-finite values.
    ///
    /// Returns `None` when the map holds no finite score.
    pub fn extremes(&self) -> Option<Extremes> {
        let location = |idx: usize| (idx % self.width, idx / self.width);
        let mut finite = self
            .data
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, v)| v.is_finite());

        let (first_idx, first) = finite.next()?;
        let mut ext = Extremes {
            min_value: first,
            max_value: first,
            min_location: location(first_idx),
            max_location: location(first_idx),
        };
        for (idx, value) in finite {
            if value < ext.min_value {
                ext.min_value = value;
                ext.min_location = location(idx);
            }
            if value > ext.max_value {
                ext.max_value = value;
                ext.max_location = location(idx);
            }
        }
        Some(ext)
    }

    /// Returns `(x, y, score)` of the best match.
    pub fn peak(&self) -> Option<(usize, usize, f32)> {
        self.extremes()
            .map(|ext| (ext.max_location.0, ext.max_location.1, ext.max_value))
    }

    /// Min-max rescales the scores to `[0, 1]`.
    pub fn rescaled(&self) -> Vec<f32> {
        // `new` guarantees at least one element.
        rescale(&self.data).unwrap_or_default()
    }

    /// Rescales and quantizes the scores to 8-bit grayscale.
    pub fn to_gray_u8(&self) -> Vec<u8> {
        quantize_u8(&self.rescaled())
    }
}

#[cfg(test)]
mod tests {
    use super::ResponseMap;

    #[test]
    fn extremes_report_first_occurrence() {
        let map = ResponseMap::new(vec![0.5, -1.0, 0.9, 0.9, -1.0, 0.0], 3, 2).unwrap();
        let ext = map.extremes().unwrap();
        assert_eq!(ext.max_location, (2, 0));
        assert_eq!(ext.min_location, (1, 0));
        assert_eq!(map.peak(), Some((2, 0, 0.9)));
    }

    #[test]
    fn extremes_skip_non_finite_scores() {
        let map = ResponseMap::new(vec![f32::NAN, f32::INFINITY, 0.25, -0.25], 2, 2).unwrap();
        let ext = map.extremes().unwrap();
        assert_eq!(ext.max_value, 0.25);
        assert_eq!(ext.min_value, -0.25);

        let empty = ResponseMap::new(vec![f32::NAN], 1, 1).unwrap();
        assert!(empty.extremes().is_none());
    }

    #[test]
    fn gray_output_spans_full_range() {
        let map = ResponseMap::new(vec![-1.0, 0.0, 1.0, 0.5], 2, 2).unwrap();
        assert_eq!(map.to_gray_u8(), vec![0, 128, 255, 191]);
    }
}
