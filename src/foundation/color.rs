//! CSS color strings as they appear in configurations.
//!
//! Only the forms the designer emits are understood: hex (`#rgb`, `#rgba`, `#rrggbb`,
//! `#rrggbbaa`), `rgb()`/`rgba()`, `hsl()`/`hsla()` and a handful of keywords. Anything else
//! parses to `None` and the caller picks its own fallback.

use crate::foundation::core::Rgba8;

pub fn parse_css_color(s: &str) -> Option<Rgba8> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    match lower.as_str() {
        "transparent" => return Some(Rgba8::TRANSPARENT),
        "white" => return Some(Rgba8::WHITE),
        "black" => return Some(Rgba8::BLACK),
        _ => {}
    }

    let (name, args) = split_function(&lower)?;
    let parts: Vec<&str> = args
        .split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    match name {
        "rgb" | "rgba" => {
            if parts.len() != 3 && parts.len() != 4 {
                return None;
            }
            let r = parse_channel(parts[0])?;
            let g = parse_channel(parts[1])?;
            let b = parse_channel(parts[2])?;
            let a = match parts.get(3) {
                Some(p) => parse_alpha(p)?,
                None => 1.0,
            };
            Some(Rgba8::new(r, g, b, unit_to_u8(a)))
        }
        "hsl" | "hsla" => {
            if parts.len() != 3 && parts.len() != 4 {
                return None;
            }
            let h: f64 = parts[0].trim_end_matches("deg").parse().ok()?;
            let sat = parse_percent(parts[1])?;
            let l = parse_percent(parts[2])?;
            let a = match parts.get(3) {
                Some(p) => parse_alpha(p)?,
                None => 1.0,
            };
            let (r, g, b) = hsl_to_rgb(h, sat, l);
            Some(Rgba8::new(
                unit_to_u8(r),
                unit_to_u8(g),
                unit_to_u8(b),
                unit_to_u8(a),
            ))
        }
        _ => None,
    }
}

fn split_function(s: &str) -> Option<(&str, &str)> {
    let open = s.find('(')?;
    let inner = s[open + 1..].strip_suffix(')')?;
    Some((s[..open].trim(), inner))
}

fn parse_hex(s: &str) -> Option<Rgba8> {
    if !s.is_ascii() {
        return None;
    }

    fn nibble(c: &str) -> Option<u8> {
        let v = u8::from_str_radix(c, 16).ok()?;
        Some(v * 17)
    }
    fn byte(pair: &str) -> Option<u8> {
        u8::from_str_radix(pair, 16).ok()
    }

    match s.len() {
        3 | 4 => {
            let r = nibble(&s[0..1])?;
            let g = nibble(&s[1..2])?;
            let b = nibble(&s[2..3])?;
            let a = if s.len() == 4 { nibble(&s[3..4])? } else { 255 };
            Some(Rgba8::new(r, g, b, a))
        }
        6 | 8 => {
            let r = byte(&s[0..2])?;
            let g = byte(&s[2..4])?;
            let b = byte(&s[4..6])?;
            let a = if s.len() == 8 { byte(&s[6..8])? } else { 255 };
            Some(Rgba8::new(r, g, b, a))
        }
        _ => None,
    }
}

fn parse_channel(p: &str) -> Option<u8> {
    if let Some(pct) = p.strip_suffix('%') {
        let v: f64 = pct.parse().ok()?;
        return Some(unit_to_u8(v / 100.0));
    }
    let v: f64 = p.parse().ok()?;
    Some(v.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(p: &str) -> Option<f64> {
    if let Some(pct) = p.strip_suffix('%') {
        let v: f64 = pct.parse().ok()?;
        return Some((v / 100.0).clamp(0.0, 1.0));
    }
    let v: f64 = p.parse().ok()?;
    Some(v.clamp(0.0, 1.0))
}

fn parse_percent(p: &str) -> Option<f64> {
    let v: f64 = p.strip_suffix('%')?.parse().ok()?;
    Some((v / 100.0).clamp(0.0, 1.0))
}

fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    if s == 0.0 {
        return (l, l, l);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
