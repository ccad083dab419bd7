//! Built-in looks and the randomizers behind "random style".

use crate::foundation::rng::Rng64;
use crate::scene::model::{Animation, BackgroundKind, Configuration, Layout, TextEffect};

/// Template identifiers, in menu order.
pub const TEMPLATE_IDS: [&str; 16] = [
    "minimal",
    "modern",
    "gradient",
    "dark",
    "pattern",
    "kawaii",
    "neon",
    "pastel",
    "cosmic",
    "tech",
    "elegant",
    "vibrant",
    "retro",
    "minimalist",
    "glassmorphism",
    "anime-dream",
];

/// Presets a fresh session picks from.
pub const STARTUP_PRESETS: [&str; 5] = [
    "gradient-blue",
    "gradient-lavender",
    "gradient-bluelavender",
    "gradient-candy",
    "gradient-neon",
];

/// Presets behind the one-click random style button.
pub const RANDOM_STYLE_PRESETS: [&str; 5] = [
    "gradient-dreamy-blue",
    "gradient-pastel-dream",
    "gradient-sky-dream",
    "gradient-twilight",
    "gradient-bluelavender",
];

const RANDOM_TITLE_EFFECTS: [TextEffect; 3] =
    [TextEffect::None, TextEffect::Gradient, TextEffect::Glow];
const RANDOM_LOGO_ANIMATIONS: [&str; 4] = ["none", "float", "pulse-soft", "rotate-slow"];

struct TextLook {
    color: &'static str,
    size: f64,
    weight: u16,
}

fn set_text(block: &mut crate::scene::model::TextBlock, look: TextLook) {
    block.color = look.color.to_owned();
    block.size = look.size;
    block.weight = look.weight;
}

fn solid(cfg: &mut Configuration, color: &str) {
    cfg.background.kind = BackgroundKind::Color;
    cfg.background.color = color.to_owned();
}

fn gradient(cfg: &mut Configuration, start: &str, end: &str, angle: f64) {
    cfg.background.kind = BackgroundKind::Gradient;
    cfg.background.gradient_start = start.to_owned();
    cfg.background.gradient_end = end.to_owned();
    cfg.background.gradient_angle = angle;
}

fn preset(cfg: &mut Configuration, name: &str) {
    cfg.background.kind = BackgroundKind::Preset;
    cfg.background.preset = name.to_owned();
}

fn glow(block: &mut crate::scene::model::TextBlock, color: &str) {
    block.effect = TextEffect::Glow;
    block.glow_color = Some(color.to_owned());
}

fn fonts(cfg: &mut Configuration, font: &str) {
    cfg.title.font = font.to_owned();
    cfg.subtitle.font = font.to_owned();
}

/// Build the named template on top of the default configuration.
pub fn template(id: &str) -> Option<Configuration> {
    let mut c = Configuration::default();
    match id {
        "minimal" => {
            solid(&mut c, "#ffffff");
            set_text(&mut c.title, TextLook { color: "#000000", size: 36.0, weight: 600 });
            set_text(&mut c.subtitle, TextLook { color: "#666666", size: 18.0, weight: 400 });
        }
        "modern" => {
            gradient(&mut c, "#f8fafc", "#e2e8f0", 135.0);
            set_text(&mut c.title, TextLook { color: "#0f172a", size: 42.0, weight: 700 });
            c.title.shadow = true;
            set_text(&mut c.subtitle, TextLook { color: "#334155", size: 20.0, weight: 500 });
        }
        "gradient" => {
            preset(&mut c, "gradient-bluelavender");
            set_text(&mut c.title, TextLook { color: "#ffffff", size: 48.0, weight: 800 });
            c.title.shadow = true;
            set_text(&mut c.subtitle, TextLook { color: "#f8fafc", size: 22.0, weight: 500 });
            c.subtitle.shadow = true;
        }
        "dark" => {
            solid(&mut c, "#0f172a");
            set_text(&mut c.title, TextLook { color: "#f8fafc", size: 40.0, weight: 700 });
            set_text(&mut c.subtitle, TextLook { color: "#94a3b8", size: 20.0, weight: 400 });
        }
        "pattern" => {
            c.background.kind = BackgroundKind::Pattern;
            c.background.pattern = "grid".to_owned();
            c.background.pattern_background = "#f1f5f9".to_owned();
            set_text(&mut c.title, TextLook { color: "#0f172a", size: 38.0, weight: 700 });
            set_text(&mut c.subtitle, TextLook { color: "#334155", size: 19.0, weight: 500 });
        }
        "kawaii" => {
            preset(&mut c, "gradient-lavender");
            set_text(&mut c.title, TextLook { color: "#ffffff", size: 44.0, weight: 800 });
            glow(&mut c.title, "rgba(181, 97, 245, 0.7)");
            c.title.shadow = true;
            set_text(&mut c.subtitle, TextLook { color: "#ffffff", size: 20.0, weight: 500 });
            c.subtitle.shadow = true;
            fonts(&mut c, "Comic Sans MS, cursive");
            c.logo.shadow = true;
            c.logo.animation = Animation::named("float");
        }
        "neon" => {
            solid(&mut c, "#0f172a");
            set_text(&mut c.title, TextLook { color: "#ffffff", size: 46.0, weight: 800 });
            glow(&mut c.title, "rgba(56, 189, 248, 0.8)");
            set_text(&mut c.subtitle, TextLook { color: "#38bdf8", size: 20.0, weight: 500 });
            glow(&mut c.subtitle, "rgba(56, 189, 248, 0.5)");
            fonts(&mut c, "Montserrat, sans-serif");
            c.logo.shadow = true;
            c.logo.animation = Animation::named("pulse-soft");
        }
        "pastel" => {
            preset(&mut c, "gradient-pastel");
            set_text(&mut c.title, TextLook { color: "#0f172a", size: 42.0, weight: 700 });
            set_text(&mut c.subtitle, TextLook { color: "#334155", size: 18.0, weight: 400 });
            fonts(&mut c, "Poppins, sans-serif");
            c.logo.border = true;
            c.logo.border_color = Some("#ffffff".to_owned());
            c.logo.border_width = Some(3.0);
        }
        "cosmic" => {
            gradient(&mut c, "#0c4a6e", "#3e0764", 135.0);
            set_text(&mut c.title, TextLook { color: "#ffffff", size: 48.0, weight: 800 });
            glow(&mut c.title, "rgba(181, 97, 245, 0.7)");
            c.title.shadow = true;
            set_text(&mut c.subtitle, TextLook { color: "#e0f2fe", size: 20.0, weight: 500 });
            c.subtitle.shadow = true;
        }
        "tech" => {
            gradient(&mut c, "#0f172a", "#1e293b", 120.0);
            set_text(&mut c.title, TextLook { color: "#38bdf8", size: 44.0, weight: 700 });
            glow(&mut c.title, "rgba(56, 189, 248, 0.7)");
            set_text(&mut c.subtitle, TextLook { color: "#94a3b8", size: 18.0, weight: 400 });
            fonts(&mut c, "Consolas, monospace");
        }
        "elegant" => {
            solid(&mut c, "#ffffff");
            set_text(&mut c.title, TextLook { color: "#1e293b", size: 46.0, weight: 300 });
            c.title.letter_spacing = Some("2px".to_owned());
            set_text(&mut c.subtitle, TextLook { color: "#64748b", size: 18.0, weight: 300 });
            c.subtitle.letter_spacing = Some("1px".to_owned());
            fonts(&mut c, "Playfair Display, serif");
        }
        "vibrant" => {
            gradient(&mut c, "#f43f5e", "#8b5cf6", 135.0);
            set_text(&mut c.title, TextLook { color: "#ffffff", size: 48.0, weight: 800 });
            c.title.shadow = true;
            glow(&mut c.title, "rgba(244, 63, 94, 0.7)");
            set_text(&mut c.subtitle, TextLook { color: "#f8fafc", size: 20.0, weight: 500 });
            c.subtitle.shadow = true;
        }
        "retro" => {
            preset(&mut c, "gradient-retro");
            set_text(&mut c.title, TextLook { color: "#f8fafc", size: 42.0, weight: 700 });
            c.title.effect = TextEffect::Retro;
            c.title.transform = Some("uppercase".to_owned());
            set_text(&mut c.subtitle, TextLook { color: "#f8fafc", size: 18.0, weight: 400 });
            fonts(&mut c, "Courier New, monospace");
        }
        "minimalist" => {
            solid(&mut c, "#f8fafc");
            set_text(&mut c.title, TextLook { color: "#0f172a", size: 36.0, weight: 500 });
            set_text(&mut c.subtitle, TextLook { color: "#64748b", size: 16.0, weight: 400 });
            fonts(&mut c, "Inter, sans-serif");
        }
        "glassmorphism" => {
            c.background.kind = BackgroundKind::Image;
            c.background.image_url = Some("/abstract-digital-pattern.png".to_owned());
            c.background.blur = true;
            c.background.blur_amount = Some(8.0);
            c.background.overlay = true;
            c.background.overlay_color = Some("rgba(255, 255, 255, 0.25)".to_owned());
            c.background.overlay_opacity = Some(50.0);
            set_text(&mut c.title, TextLook { color: "#ffffff", size: 44.0, weight: 700 });
            c.title.shadow = true;
            set_text(&mut c.subtitle, TextLook { color: "#f8fafc", size: 18.0, weight: 400 });
            c.subtitle.shadow = true;
        }
        "anime-dream" => {
            gradient(&mut c, "#bae6fd", "#c4b5fd", 135.0);
            c.background.overlay = true;
            c.background.overlay_color = Some("rgba(255, 255, 255, 0.15)".to_owned());
            c.background.overlay_opacity = Some(40.0);
            set_text(&mut c.title, TextLook { color: "#1e3a8a", size: 48.0, weight: 700 });
            glow(&mut c.title, "rgba(56, 189, 248, 0.7)");
            c.title.shadow = true;
            set_text(&mut c.subtitle, TextLook { color: "#334155", size: 20.0, weight: 500 });
            fonts(&mut c, "Poppins, sans-serif");
            c.logo.shadow = true;
            c.logo.animation = Animation::named("floating-light");
            c.logo.border = true;
            c.logo.border_color = Some("#ffffff".to_owned());
            c.logo.border_width = Some(2.0);
        }
        _ => return None,
    }
    Some(c)
}

/// Randomize palette, layout, title effect and logo animation, keeping everything else.
pub fn random_style(rng: &mut Rng64, current: &Configuration) -> Configuration {
    let hue1 = rng.below(360);
    let hue2 = (hue1 + rng.below(60) + 30) % 360;
    let start = format!("hsl({hue1}, 80%, 65%)");
    let end = format!("hsl({hue2}, 80%, 55%)");

    let mut c = current.clone();
    c.canvas.layout = if rng.next_f64_01() > 0.5 {
        Layout::Horizontal
    } else {
        Layout::Vertical
    };

    c.background.kind = BackgroundKind::Gradient;
    c.background.gradient_start = start.clone();
    c.background.gradient_end = end.clone();
    c.background.gradient_angle = rng.below(360) as f64;

    let effect = rng
        .pick(&RANDOM_TITLE_EFFECTS)
        .cloned()
        .unwrap_or_default();
    c.title.effect = effect;
    c.title.glow_color = Some(format!("hsla({hue1}, 80%, 65%, 0.8)"));
    c.title.gradient_start = Some(start);
    c.title.gradient_end = Some(end);

    let anim = rng.pick(&RANDOM_LOGO_ANIMATIONS).copied().unwrap_or("none");
    c.logo.animation = Animation::named(anim);
    c
}

/// Switch the background to a randomly chosen preset from `presets`.
pub fn apply_random_preset(rng: &mut Rng64, cfg: &mut Configuration, presets: &[&str]) {
    if let Some(name) = rng.pick(presets) {
        preset(cfg, name);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/templates.rs"]
mod tests;
