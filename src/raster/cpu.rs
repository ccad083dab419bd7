use rayon::prelude::*;

use crate::compile::compiler::{
    DEFAULT_CONTENT_PADDING, DEFAULT_LOGO_OPACITY, DEFAULT_OVERLAY_OPACITY,
};
use crate::foundation::color::parse_css_color;
use crate::foundation::core::{
    Circle, Point, RasterImage, Rect, Rgba8, RoundedRect, Shape, Vec2, blend_over,
};
use crate::foundation::error::{BannerError, BannerResult};
use crate::raster::{CaptureOptions, Rasterizer};
use crate::scene::model::{
    ActiveBackground, Background, Configuration, Layout, LogoPosition, LogoShape,
};

/// Largest capture edge, in device pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// Stand-in for content that is not fetched (presets, images).
const NEUTRAL_FILL: Rgba8 = Rgba8::new(148, 163, 184, 255);
const LOGO_FILL: Rgba8 = Rgba8::new(226, 232, 240, 255);
const DEFAULT_OVERLAY: Rgba8 = Rgba8::new(0, 0, 0, 77);

/// Reference rasterizer for a [`Configuration`] root.
///
/// Paints the container background, the overlay and the logo box, clipped to the rounded
/// container. Text is not drawn and images are never fetched.
#[derive(Debug, Default)]
pub struct CpuRasterizer {
    captures: u64,
}

impl CpuRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful captures so far.
    pub fn captures(&self) -> u64 {
        self.captures
    }
}

impl Rasterizer for CpuRasterizer {
    type Root = Configuration;

    #[tracing::instrument(level = "debug", skip(self, root), fields(w = root.canvas.width, h = root.canvas.height))]
    fn capture(&mut self, root: &Configuration, opts: &CaptureOptions) -> BannerResult<RasterImage> {
        let (w, h) = scaled_size(root.canvas.width, root.canvas.height, opts.scale)?;
        let (wf, hf) = (f64::from(w), f64::from(h));
        let scale = opts.scale;

        let radius = (root.canvas.border_radius * scale).clamp(0.0, wf.min(hf) / 2.0);
        let clip = RoundedRect::from_rect(Rect::new(0.0, 0.0, wf, hf), radius);
        let base = if opts.transparent_background {
            Rgba8::TRANSPARENT
        } else {
            Rgba8::WHITE
        };
        let background = Fill::for_background(&root.background, wf, hf, opts.allow_cross_origin);
        let overlay = overlay_color(&root.background);
        let logo = LogoMark::for_config(root, wf, hf, scale, opts.allow_cross_origin);

        let row_bytes = w as usize * 4;
        let mut data = vec![0u8; row_bytes * h as usize];
        data.par_chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, px) in row.chunks_exact_mut(4).enumerate() {
                    let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                    let mut c = base;
                    if clip.contains(p) {
                        if let Some(bg) = background.at(p) {
                            c = blend_over(c, bg);
                        }
                        if let Some(o) = overlay {
                            c = blend_over(c, o);
                        }
                        if let Some(l) = logo.as_ref().and_then(|l| l.at(p)) {
                            c = blend_over(c, l);
                        }
                    }
                    px.copy_from_slice(&c.to_array());
                }
            });

        self.captures += 1;
        RasterImage::from_rgba8(w, h, data)
    }
}

/// Device size for a capture; errors on unusable scales and sizes.
pub fn scaled_size(width: u32, height: u32, scale: f64) -> BannerResult<(u32, u32)> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(BannerError::capture(format!(
            "scale must be a positive finite number, got {scale}"
        )));
    }
    let w = (f64::from(width) * scale).round();
    let h = (f64::from(height) * scale).round();
    if w < 1.0 || h < 1.0 {
        return Err(BannerError::capture(format!(
            "capture size {w}x{h} is empty"
        )));
    }
    if w > f64::from(MAX_DIMENSION) || h > f64::from(MAX_DIMENSION) {
        return Err(BannerError::capture(format!(
            "capture size {w}x{h} exceeds {MAX_DIMENSION}px"
        )));
    }
    Ok((w as u32, h as u32))
}

/// Absolute http(s) URLs count as another origin; relative and data URLs do not.
fn is_cross_origin(url: &str) -> bool {
    let u = url.trim_start().to_ascii_lowercase();
    u.starts_with("http://") || u.starts_with("https://") || u.starts_with("//")
}

fn color_or(s: &str, fallback: Rgba8) -> Rgba8 {
    parse_css_color(s).unwrap_or(fallback)
}

enum Fill {
    None,
    Solid(Rgba8),
    Linear {
        start: Rgba8,
        end: Rgba8,
        dir: Vec2,
        center: Point,
        len: f64,
    },
}

impl Fill {
    fn for_background(bg: &Background, w: f64, h: f64, allow_cross_origin: bool) -> Self {
        match bg.active() {
            ActiveBackground::Color { color } => Self::Solid(color_or(color, NEUTRAL_FILL)),
            ActiveBackground::Gradient { start, end, angle } => {
                // CSS convention: 0deg points up, angles run clockwise, and the gradient line
                // is long enough for the corners to hit the end stops exactly.
                let rad = angle.to_radians();
                let dir = Vec2::new(rad.sin(), -rad.cos());
                Self::Linear {
                    start: color_or(start, NEUTRAL_FILL),
                    end: color_or(end, NEUTRAL_FILL),
                    dir,
                    center: Point::new(w / 2.0, h / 2.0),
                    len: (w * rad.sin()).abs() + (h * rad.cos()).abs(),
                }
            }
            ActiveBackground::Pattern { background, .. } => {
                Self::Solid(color_or(background, NEUTRAL_FILL))
            }
            ActiveBackground::Preset { .. } => Self::Solid(NEUTRAL_FILL),
            ActiveBackground::Image { url: Some(url), .. }
                if allow_cross_origin || !is_cross_origin(url) =>
            {
                Self::Solid(NEUTRAL_FILL)
            }
            ActiveBackground::Image { .. } | ActiveBackground::Unknown => Self::None,
        }
    }

    fn at(&self, p: Point) -> Option<Rgba8> {
        match self {
            Self::None => None,
            Self::Solid(c) => Some(*c),
            Self::Linear {
                start,
                end,
                dir,
                center,
                len,
            } => {
                let t = if *len > 0.0 {
                    (p - *center).dot(*dir) / len + 0.5
                } else {
                    0.5
                };
                Some(start.lerp(*end, t))
            }
        }
    }
}

fn overlay_color(bg: &Background) -> Option<Rgba8> {
    if !bg.overlay {
        return None;
    }
    let color = bg
        .overlay_color
        .as_deref()
        .and_then(parse_css_color)
        .unwrap_or(DEFAULT_OVERLAY);
    let opacity = bg.overlay_opacity.unwrap_or(DEFAULT_OVERLAY_OPACITY) / 100.0;
    Some(color.with_opacity(opacity))
}

enum Outline {
    Circle(Circle),
    Rounded(RoundedRect),
}

impl Outline {
    fn contains(&self, p: Point) -> bool {
        match self {
            Self::Circle(c) => c.contains(p),
            Self::Rounded(r) => r.contains(p),
        }
    }
}

struct LogoMark {
    outer: Outline,
    inner: Option<Outline>,
    fill: Rgba8,
    border: Rgba8,
}

impl LogoMark {
    fn for_config(
        cfg: &Configuration,
        w: f64,
        h: f64,
        scale: f64,
        allow_cross_origin: bool,
    ) -> Option<Self> {
        let logo = &cfg.logo;
        if !logo.visible || logo.size <= 0.0 {
            return None;
        }
        if let Some(url) = logo.url.as_deref()
            && !allow_cross_origin
            && is_cross_origin(url)
        {
            tracing::debug!(url, "skipping cross-origin logo");
            return None;
        }

        let size = logo.size * scale;
        let pad = cfg.canvas.content_padding.unwrap_or(DEFAULT_CONTENT_PADDING) * scale;
        let leading = logo.position == LogoPosition::Left;
        let (cx, cy) = match cfg.canvas.layout {
            Layout::Horizontal => {
                let x = if leading {
                    pad + size / 2.0
                } else {
                    w - pad - size / 2.0
                };
                (x, h / 2.0)
            }
            Layout::Vertical => {
                let y = if leading {
                    pad + size / 2.0
                } else {
                    h - pad - size / 2.0
                };
                (w / 2.0, y)
            }
        };
        let center = Point::new(cx + logo.offset_x * scale, cy + logo.offset_y * scale);
        let border_w = if logo.border {
            logo.border_width.unwrap_or(2.0) * scale
        } else {
            0.0
        };

        let outline = |inset: f64| -> Option<Outline> {
            let half = size / 2.0 - inset;
            if half <= 0.0 {
                return None;
            }
            Some(match logo.shape {
                LogoShape::Circle => Outline::Circle(Circle::new(center, half)),
                LogoShape::Square => {
                    let rect = Rect::from_center_size(center, (half * 2.0, half * 2.0));
                    let r = (logo.border_radius * scale - inset).clamp(0.0, half);
                    Outline::Rounded(RoundedRect::from_rect(rect, r))
                }
            })
        };

        let opacity = logo.opacity.unwrap_or(DEFAULT_LOGO_OPACITY) / 100.0;
        let border = logo
            .border_color
            .as_deref()
            .and_then(parse_css_color)
            .unwrap_or(Rgba8::WHITE);

        let outer = outline(0.0)?;
        let inner = if border_w > 0.0 { outline(border_w) } else { None };
        // A border at least as wide as the radius leaves no interior.
        let fill = if border_w > 0.0 && inner.is_none() {
            border
        } else {
            LOGO_FILL
        };
        Some(Self {
            outer,
            inner,
            fill: fill.with_opacity(opacity),
            border: border.with_opacity(opacity),
        })
    }

    fn at(&self, p: Point) -> Option<Rgba8> {
        if !self.outer.contains(p) {
            return None;
        }
        match &self.inner {
            Some(inner) if !inner.contains(p) => Some(self.border),
            _ => Some(self.fill),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/cpu.rs"]
mod tests;
