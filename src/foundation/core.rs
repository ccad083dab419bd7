use crate::foundation::error::{BannerError, BannerResult};

pub use kurbo::{Circle, Point, Rect, RoundedRect, Shape, Vec2};

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply alpha by `opacity` in `0..=1`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (f64::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Linear interpolation in straight-alpha space.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        fn mix(a: u8, b: u8, t: f64) -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
        }
        Self {
            r: mix(self.r, other.r, t),
            g: mix(self.g, other.g, t),
            b: mix(self.b, other.b, t),
            a: mix(self.a, other.a, t),
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A captured bitmap of the visual root at one instant.
///
/// Pixels are straight-alpha RGBA8, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes.
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Allocate an image filled with `fill`.
    pub fn filled(width: u32, height: u32, fill: Rgba8) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&fill.to_array());
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap raw RGBA8 bytes, checking the buffer length.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> BannerResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(BannerError::validation(format!(
                "raster data length {} does not match {width}x{height} rgba8 ({expected})",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.data[i..i + 4];
        Some(Rgba8::new(p[0], p[1], p[2], p[3]))
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, c: Rgba8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&c.to_array());
    }

    /// Convert into an `image` buffer for encoding.
    pub fn to_rgba_image(&self) -> BannerResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| BannerError::validation("raster buffer does not match its dimensions"))
    }
}

/// Straight-alpha source-over.
pub fn blend_over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = f64::from(src.a) / 255.0;
    let da = f64::from(dst.a) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba8::TRANSPARENT;
    }
    let ch = |s: u8, d: u8| -> u8 {
        let v = (f64::from(s) * sa + f64::from(d) * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgba8 {
        r: ch(src.r, dst.r),
        g: ch(src.g, dst.g),
        b: ch(src.b, dst.b),
        a: (out_a * 255.0).round() as u8,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
