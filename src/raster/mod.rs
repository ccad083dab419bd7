//! Capturing the rendered header as a bitmap.

pub mod cpu;

use crate::foundation::core::RasterImage;
use crate::foundation::error::BannerResult;

pub use cpu::CpuRasterizer;

/// Per-capture options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureOptions {
    /// Device-pixel multiplier; must be positive and finite.
    pub scale: f64,
    /// Leave pixels not covered by the header at alpha 0 instead of white.
    pub transparent_background: bool,
    /// Draw images from other origins instead of skipping them.
    pub allow_cross_origin: bool,
}

impl CaptureOptions {
    pub fn still(scale: f64, transparent_background: bool) -> Self {
        Self {
            scale,
            transparent_background,
            allow_cross_origin: false,
        }
    }

    pub fn frame(transparent_background: bool) -> Self {
        Self {
            scale: 1.0,
            transparent_background,
            allow_cross_origin: true,
        }
    }
}

/// Turns a visual root into a still bitmap.
///
/// Each call returns an owned image; callers may keep it across later captures.
/// Failures are reported as [`crate::BannerError::Capture`].
pub trait Rasterizer {
    type Root: ?Sized;

    fn capture(&mut self, root: &Self::Root, opts: &CaptureOptions) -> BannerResult<RasterImage>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &mut R {
    type Root = R::Root;

    fn capture(&mut self, root: &Self::Root, opts: &CaptureOptions) -> BannerResult<RasterImage> {
        (**self).capture(root, opts)
    }
}
