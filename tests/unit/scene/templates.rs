use super::*;
use crate::foundation::color::parse_css_color;

#[test]
fn every_listed_template_builds_and_validates() {
    for id in TEMPLATE_IDS {
        let cfg = template(id).unwrap_or_else(|| panic!("template {id} missing"));
        cfg.validate().unwrap();
    }
    assert!(template("does-not-exist").is_none());
}

#[test]
fn kawaii_sets_glow_and_animated_logo() {
    let cfg = template("kawaii").unwrap();
    assert_eq!(cfg.title.effect, TextEffect::Glow);
    assert_eq!(cfg.title.glow_color.as_deref(), Some("rgba(181, 97, 245, 0.7)"));
    assert!(cfg.logo.animation.is_active());
    assert_eq!(cfg.subtitle.font, "Comic Sans MS, cursive");
}

#[test]
fn templates_keep_inactive_background_fields_from_default() {
    let cfg = template("minimal").unwrap();
    assert_eq!(cfg.background.kind, BackgroundKind::Color);
    let default_bg = Configuration::default().background;
    assert_eq!(cfg.background.gradient_start, default_bg.gradient_start);
    assert_eq!(cfg.background.preset, default_bg.preset);
}

#[test]
fn random_style_is_seed_deterministic_and_parseable() {
    let base = Configuration::default();
    let a = random_style(&mut Rng64::new(9), &base);
    let b = random_style(&mut Rng64::new(9), &base);
    assert_eq!(a, b);

    assert_eq!(a.background.kind, BackgroundKind::Gradient);
    assert!(parse_css_color(&a.background.gradient_start).is_some());
    assert!(parse_css_color(&a.background.gradient_end).is_some());
    assert!(parse_css_color(a.title.glow_color.as_deref().unwrap()).is_some());
    assert!((0.0..360.0).contains(&a.background.gradient_angle));
    assert_eq!(a.subtitle, base.subtitle);
}

#[test]
fn random_preset_picks_from_list() {
    let mut cfg = Configuration::default();
    apply_random_preset(&mut Rng64::new(3), &mut cfg, &STARTUP_PRESETS);
    assert_eq!(cfg.background.kind, BackgroundKind::Preset);
    assert!(STARTUP_PRESETS.contains(&cfg.background.preset.as_str()));
}
