use super::*;

#[test]
fn from_rgba8_rejects_wrong_length() {
    assert!(RasterImage::from_rgba8(2, 2, vec![0; 16]).is_ok());
    assert!(RasterImage::from_rgba8(2, 2, vec![0; 15]).is_err());
}

#[test]
fn filled_image_reports_fill_everywhere() {
    let img = RasterImage::filled(3, 2, Rgba8::new(1, 2, 3, 4));
    assert_eq!(img.data.len(), 3 * 2 * 4);
    assert_eq!(img.pixel(2, 1), Some(Rgba8::new(1, 2, 3, 4)));
    assert_eq!(img.pixel(3, 0), None);
}

#[test]
fn blend_over_opaque_source_replaces_destination() {
    let out = blend_over(Rgba8::WHITE, Rgba8::new(10, 20, 30, 255));
    assert_eq!(out, Rgba8::new(10, 20, 30, 255));
}

#[test]
fn blend_over_half_alpha_mixes_channels() {
    let out = blend_over(Rgba8::BLACK, Rgba8::new(255, 0, 0, 128));
    assert_eq!(out.a, 255);
    assert!((127..=129).contains(&out.r));
    assert_eq!(out.g, 0);
}

#[test]
fn blend_onto_transparent_keeps_source_color() {
    let out = blend_over(Rgba8::TRANSPARENT, Rgba8::new(200, 100, 50, 128));
    assert_eq!(out, Rgba8::new(200, 100, 50, 128));
}

#[test]
fn lerp_endpoints_and_midpoint() {
    let a = Rgba8::new(0, 0, 0, 255);
    let b = Rgba8::new(200, 100, 50, 255);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Rgba8::new(100, 50, 25, 255));
}

#[test]
fn with_opacity_scales_alpha_only() {
    let c = Rgba8::new(10, 20, 30, 200).with_opacity(0.5);
    assert_eq!(c, Rgba8::new(10, 20, 30, 100));
}
