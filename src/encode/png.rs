use std::io::Cursor;

use image::ImageFormat;

use crate::encode::flatten_over_white;
use crate::foundation::core::RasterImage;
use crate::foundation::error::{BannerError, BannerResult};

/// Encode a still capture as PNG bytes.
///
/// Opaque exports are flattened over white so no stray alpha survives into the file.
pub fn encode_png(raster: &RasterImage, transparent: bool) -> BannerResult<Vec<u8>> {
    let img = if transparent {
        raster.to_rgba_image()?
    } else {
        flatten_over_white(raster)?.to_rgba_image()?
    };

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|e| BannerError::encode(format!("png encoding failed: {e}")))?;
    Ok(out.into_inner())
}
