//! ncc2d computes dense normalized cross-correlation (ZNCC) response maps.
//!
//! The image is zero-padded so the template can be centered on every source
//! pixel; each window is standardized independently and dotted with the
//! standardized template, giving one score per pixel. Row-parallel scoring is
//! available with the `rayon` feature and file I/O with `image-io`.

mod trace;

pub mod correlate;
pub mod image;
pub mod kernel;
pub mod normalize;
pub mod pad;
pub mod template;
pub mod util;

pub use correlate::{correlate, CorrelationConfig, Correlator, Method};
#[cfg(feature = "image-io")]
pub use crate::image::io;
pub use crate::image::{Extremes, ImageView, OwnedImage, ResponseMap};
pub use normalize::{quantize_u8, rescale, standardize};
pub use pad::{compute_padding, pad_image, Padding};
pub use template::{Template, TemplatePlan};
pub use util::{NccError, NccResult};
