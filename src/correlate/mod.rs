//! Dense normalized cross-correlation over every source pixel.

use crate::image::{ImageView, ResponseMap};
use crate::kernel::{scalar, Direct, Kernel, Moments};
use crate::pad::{compute_padding, pad_image, Padding};
use crate::template::{Template, TemplatePlan};
use crate::trace::{trace_event, trace_span};
use crate::util::{NccError, NccResult};

/// Window scoring strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Standardize every window explicitly, then take the dot product.
    Direct,
    /// Use integer window moments; equal to `Direct` within float tolerance.
    #[default]
    Moments,
}

/// Correlation configuration.
#[derive(Clone, Debug, Default)]
pub struct CorrelationConfig {
    /// Window scoring strategy.
    pub method: Method,
    /// Score rows in parallel (requires the `rayon` feature, ignored otherwise).
    pub parallel: bool,
}

/// Template prepared for correlation against any number of images.
pub struct Correlator {
    plan: TemplatePlan,
    pad_h: Padding,
    pad_w: Padding,
    cfg: CorrelationConfig,
}

impl Correlator {
    /// Standardizes `template` and derives the per-axis padding.
    pub fn new(template: &Template) -> NccResult<Self> {
        let plan = TemplatePlan::from_view(template.view())?;
        let pad_h = compute_padding(plan.height())?;
        let pad_w = compute_padding(plan.width())?;
        Ok(Self {
            plan,
            pad_h,
            pad_w,
            cfg: CorrelationConfig::default(),
        })
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: CorrelationConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CorrelationConfig {
        &self.cfg
    }

    /// Returns the standardized template.
    pub fn plan(&self) -> &TemplatePlan {
        &self.plan
    }

    /// Returns the `(vertical, horizontal)` padding applied to images.
    pub fn padding(&self) -> (Padding, Padding) {
        (self.pad_h, self.pad_w)
    }

    /// Correlates the template against `image`.
    ///
    /// The template must be strictly smaller than the image along both axes.
    /// Zero-variance windows score 0. A constant template scores every window
    /// by how close its mean intensity is to the template's, in `[0, 1]`.
    pub fn correlate(&self, image: ImageView<'_, u8>) -> NccResult<ResponseMap> {
        let width = image.width();
        let height = image.height();
        let tpl_width = self.plan.width();
        let tpl_height = self.plan.height();
        if tpl_width >= width || tpl_height >= height {
            return Err(NccError::InvalidTemplateSize {
                template_width: tpl_width,
                template_height: tpl_height,
                image_width: width,
                image_height: height,
            });
        }

        let _span = trace_span!(
            "correlate",
            width = width,
            height = height,
            tpl_width = tpl_width,
            tpl_height = tpl_height,
            method = ?self.cfg.method,
            parallel = self.cfg.parallel
        )
        .entered();

        let padded = pad_image(image, self.pad_h, self.pad_w)?;
        let mut scores = vec![0.0f32; width * height];
        let degenerate_patches = match self.cfg.method {
            Method::Direct => self.run::<Direct>(padded.view(), width, &mut scores)?,
            Method::Moments => self.run::<Moments>(padded.view(), width, &mut scores)?,
        };

        let map = ResponseMap::new(scores, width, height)?
            .with_degeneracy(self.plan.is_degenerate(), degenerate_patches);
        trace_event!(
            "correlate_done",
            degenerate_template = map.degenerate_template(),
            degenerate_patches = degenerate_patches
        );
        Ok(map)
    }

    fn run<K: Kernel>(
        &self,
        padded: ImageView<'_, u8>,
        width: usize,
        out: &mut [f32],
    ) -> NccResult<usize> {
        #[cfg(feature = "rayon")]
        if self.cfg.parallel {
            return crate::kernel::rayon::correlate_rows_par::<K>(padded, &self.plan, width, out);
        }
        scalar::correlate_rows::<K>(padded, &self.plan, width, out)
    }
}

/// Correlates `template` against `image` with the default configuration.
pub fn correlate(image: ImageView<'_, u8>, template: &Template) -> NccResult<ResponseMap> {
    Correlator::new(template)?.correlate(image)
}
