//! Border padding so the template can be centered on every source pixel.

use crate::image::{checked_area, ImageView, OwnedImage};
use crate::trace::trace_span;
use crate::util::{NccError, NccResult};

/// Zero rows (or columns) added before and after one image axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Padding {
    /// Cells added at the start of the axis (top or left).
    pub before: usize,
    /// Cells added at the end of the axis (bottom or right).
    pub after: usize,
}

impl Padding {
    /// Total cells added along the axis, always `template_dim - 1`.
    pub fn total(&self) -> usize {
        self.before + self.after
    }
}

/// Computes the padding for one template dimension.
///
/// With `p = (n - 1) / 2`: an integral `p` pads `p` on both sides, a
/// half-integral `p` pads `ceil(p)` before and `floor(p)` after. Either way
/// `before + after == n - 1`, so sliding the template over every source
/// position yields a response map of the source size.
pub fn compute_padding(template_dim: usize) -> NccResult<Padding> {
    if template_dim == 0 {
        return Err(NccError::InvalidDimensions {
            width: template_dim,
            height: template_dim,
        });
    }
    Ok(Padding {
        before: template_dim / 2,
        after: (template_dim - 1) / 2,
    })
}

/// Zero-extends `image` by `pad_h` rows and `pad_w` columns.
pub fn pad_image(image: ImageView<'_, u8>, pad_h: Padding, pad_w: Padding) -> NccResult<OwnedImage> {
    let _span = trace_span!(
        "pad_image",
        pad_top = pad_h.before,
        pad_bottom = pad_h.after,
        pad_left = pad_w.before,
        pad_right = pad_w.after
    )
    .entered();

    let src_width = image.width();
    let src_height = image.height();
    let width = src_width
        .checked_add(pad_w.total())
        .ok_or(NccError::InvalidDimensions {
            width: src_width,
            height: src_height,
        })?;
    let height = src_height
        .checked_add(pad_h.total())
        .ok_or(NccError::InvalidDimensions {
            width: src_width,
            height: src_height,
        })?;
    let area = checked_area(width, height)?;

    let mut padded = OwnedImage::new(vec![0u8; area], width, height)?;
    let dst = padded.data_mut();
    for y in 0..src_height {
        let row = image.row(y).ok_or(NccError::BufferTooSmall {
            needed: (y + 1) * image.stride(),
            got: image.as_slice().len(),
        })?;
        let start = (y + pad_h.before) * width + pad_w.before;
        dst[start..start + src_width].copy_from_slice(row);
    }
    Ok(padded)
}

#[cfg(test)]
mod tests {
    use super::{compute_padding, pad_image, Padding};
    use crate::image::ImageView;

    #[test]
    fn padding_follows_parity_rule() {
        let cases = [
            (1, (0, 0)),
            (2, (1, 0)),
            (3, (1, 1)),
            (4, (2, 1)),
            (5, (2, 2)),
            (6, (3, 2)),
            (7, (3, 3)),
        ];
        for (dim, (before, after)) in cases {
            assert_eq!(compute_padding(dim).unwrap(), Padding { before, after }, "dim {dim}");
        }
    }

    #[test]
    fn padding_total_is_template_dim_minus_one() {
        for dim in 1..64 {
            assert_eq!(compute_padding(dim).unwrap().total(), dim - 1);
        }
    }

    #[test]
    fn padding_rejects_zero() {
        assert!(compute_padding(0).is_err());
    }

    #[test]
    fn pad_image_places_interior_and_zero_border() {
        let data = [1u8, 2, 3, 4, 5, 6];
        let view = ImageView::from_slice(&data, 3, 2).unwrap();
        let padded = pad_image(
            view,
            Padding { before: 1, after: 0 },
            Padding { before: 2, after: 1 },
        )
        .unwrap();

        assert_eq!(padded.width(), 6);
        assert_eq!(padded.height(), 3);
        #[rustfmt::skip]
        let expected = [
            0, 0, 0, 0, 0, 0,
            0, 0, 1, 2, 3, 0,
            0, 0, 4, 5, 6, 0,
        ];
        assert_eq!(padded.data(), &expected);
    }

    #[test]
    fn pad_image_reads_strided_views() {
        let data = [9u8, 8, 0xAA, 7, 6, 0xAA];
        let view = ImageView::new(&data, 2, 2, 3).unwrap();
        let pad = Padding { before: 1, after: 1 };
        let padded = pad_image(view, pad, pad).unwrap();
        assert_eq!(padded.view().row(1).unwrap(), &[0, 9, 8, 0]);
        assert_eq!(padded.view().row(2).unwrap(), &[0, 7, 6, 0]);
    }
}
