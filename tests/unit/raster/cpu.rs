use super::*;
use crate::scene::model::BackgroundKind;

fn solid(width: u32, height: u32, color: &str) -> Configuration {
    let mut c = Configuration::default();
    c.canvas.width = width;
    c.canvas.height = height;
    c.canvas.border_radius = 0.0;
    c.background.kind = BackgroundKind::Color;
    c.background.color = color.to_owned();
    c.logo.visible = false;
    c
}

#[test]
fn output_size_follows_scale() {
    let mut r = CpuRasterizer::new();
    let img = r
        .capture(&solid(100, 50, "#ff0000"), &CaptureOptions::still(1.5, false))
        .unwrap();
    assert_eq!((img.width, img.height), (150, 75));
    assert_eq!(img.pixel(10, 10), Some(Rgba8::new(255, 0, 0, 255)));
    assert_eq!(r.captures(), 1);
}

#[test]
fn invalid_scale_and_empty_size_are_capture_errors() {
    let mut r = CpuRasterizer::new();
    let cfg = solid(10, 10, "#000");
    for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = r.capture(&cfg, &CaptureOptions::still(scale, false)).unwrap_err();
        assert!(matches!(err, BannerError::Capture(_)), "{err}");
    }
    let err = r.capture(&cfg, &CaptureOptions::still(0.01, false)).unwrap_err();
    assert!(matches!(err, BannerError::Capture(_)));
    assert_eq!(r.captures(), 0);
}

#[test]
fn rounded_corners_use_base_color() {
    let mut cfg = solid(40, 40, "#000000");
    cfg.canvas.border_radius = 20.0;
    let mut r = CpuRasterizer::new();

    let opaque = r.capture(&cfg, &CaptureOptions::still(1.0, false)).unwrap();
    assert_eq!(opaque.pixel(0, 0), Some(Rgba8::WHITE));
    assert_eq!(opaque.pixel(20, 20), Some(Rgba8::BLACK));

    let clear = r.capture(&cfg, &CaptureOptions::still(1.0, true)).unwrap();
    assert_eq!(clear.pixel(0, 0).unwrap().a, 0);
    assert_eq!(clear.pixel(20, 20), Some(Rgba8::BLACK));
}

#[test]
fn gradient_follows_css_angle() {
    let mut cfg = solid(100, 10, "#000");
    cfg.background.kind = BackgroundKind::Gradient;
    cfg.background.gradient_start = "#000000".to_owned();
    cfg.background.gradient_end = "#ffffff".to_owned();
    cfg.background.gradient_angle = 90.0;
    let img = CpuRasterizer::new()
        .capture(&cfg, &CaptureOptions::frame(false))
        .unwrap();
    let left = img.pixel(0, 5).unwrap();
    let right = img.pixel(99, 5).unwrap();
    assert!(left.r < 5, "{left:?}");
    assert!(right.r > 250, "{right:?}");

    cfg.background.gradient_angle = 180.0;
    let img = CpuRasterizer::new()
        .capture(&cfg, &CaptureOptions::frame(false))
        .unwrap();
    // Top to bottom: a row is uniform.
    assert_eq!(img.pixel(0, 2), img.pixel(99, 2));
}

#[test]
fn overlay_darkens_background() {
    let mut cfg = solid(10, 10, "#ffffff");
    cfg.background.overlay = true;
    cfg.background.overlay_color = Some("#000000".to_owned());
    cfg.background.overlay_opacity = Some(50.0);
    let img = CpuRasterizer::new()
        .capture(&cfg, &CaptureOptions::still(1.0, false))
        .unwrap();
    let p = img.pixel(5, 5).unwrap();
    assert!((126..=129).contains(&p.r), "{p:?}");
}

#[test]
fn logo_box_sits_inside_padding() {
    let mut cfg = solid(400, 200, "#000000");
    cfg.logo.visible = true;
    let img = CpuRasterizer::new()
        .capture(&cfg, &CaptureOptions::still(1.0, false))
        .unwrap();
    // size 80, padding 40, vertically centred on the left.
    assert_eq!(img.pixel(80, 100), Some(LOGO_FILL));
    assert_eq!(img.pixel(20, 100), Some(Rgba8::BLACK));

    cfg.logo.position = LogoPosition::Right;
    let img = CpuRasterizer::new()
        .capture(&cfg, &CaptureOptions::still(1.0, false))
        .unwrap();
    assert_eq!(img.pixel(320, 100), Some(LOGO_FILL));
    assert_eq!(img.pixel(80, 100), Some(Rgba8::BLACK));
}

#[test]
fn cross_origin_images_are_skipped_unless_allowed() {
    let mut cfg = solid(200, 200, "#000000");
    cfg.background.kind = BackgroundKind::Image;
    cfg.background.image_url = Some("https://cdn.example.com/bg.png".to_owned());
    cfg.logo.visible = true;
    cfg.logo.url = Some("https://cdn.example.com/logo.png".to_owned());

    let mut r = CpuRasterizer::new();
    let still = r.capture(&cfg, &CaptureOptions::still(1.0, true)).unwrap();
    assert_eq!(still.pixel(100, 100).unwrap().a, 0);

    let frame = r.capture(&cfg, &CaptureOptions::frame(true)).unwrap();
    assert_eq!(frame.pixel(150, 100), Some(NEUTRAL_FILL));
    assert_eq!(frame.pixel(80, 100), Some(LOGO_FILL));
}

#[test]
fn cross_origin_detection() {
    assert!(is_cross_origin("https://a.b/c.png"));
    assert!(is_cross_origin("//cdn/x.png"));
    assert!(!is_cross_origin("/placeholder.svg"));
    assert!(!is_cross_origin("data:image/png;base64,AAAA"));
}

#[test]
fn logo_border_wider_than_radius_paints_solid_border() {
    let mut cfg = solid(400, 200, "#000000");
    cfg.logo.visible = true;
    cfg.logo.border = true;
    cfg.logo.border_color = Some("#ff0000".to_owned());
    let red = Rgba8::new(255, 0, 0, 255);

    cfg.logo.border_width = Some(10.0);
    let img = CpuRasterizer::new()
        .capture(&cfg, &CaptureOptions::still(1.0, false))
        .unwrap();
    assert_eq!(img.pixel(80, 100), Some(LOGO_FILL));
    assert_eq!(img.pixel(80, 64), Some(red));

    cfg.logo.border_width = Some(50.0);
    let img = CpuRasterizer::new()
        .capture(&cfg, &CaptureOptions::still(1.0, false))
        .unwrap();
    assert_eq!(img.pixel(80, 100), Some(red));
}
