use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{BannerError, BannerResult};

/// The complete header configuration.
///
/// Always fully populated: optional fields carry `None` and the style compiler supplies the
/// documented defaults. The JSON shape is camelCase with the canvas fields at the top level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(flatten)]
    pub canvas: Canvas,
    pub title: TextBlock,
    pub subtitle: TextBlock,
    pub background: Background,
    pub logo: Logo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub border_radius: f64,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_padding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_subtitle_gap: Option<f64>,
    #[serde(default)]
    pub preview_border: bool,
    /// Raster scale multiplier for still exports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_quality: Option<f64>,
    #[serde(default)]
    pub export_format: ExportFormat,
    #[serde(default)]
    pub transparent_background: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    #[serde(alias = "png")]
    Still,
    #[serde(alias = "gif")]
    Animated,
}

/// Title or subtitle text with its typography, effect and animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub visible: bool,
    pub text: String,
    pub font: String,
    pub size: f64,
    pub weight: u16,
    pub color: String,
    pub spacing: f64,
    #[serde(default)]
    pub shadow: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(default)]
    pub effect: TextEffect,
    // Effect parameters are kept while another effect is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<String>,
    #[serde(default)]
    pub animation: Animation,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
}

/// Text effect discriminant. Unknown names survive a load/save round trip as `Other`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TextEffect {
    #[default]
    None,
    Gradient,
    Glow,
    Outline,
    Shadow,
    Emboss,
    ThreeD,
    Retro,
    Neon,
    Glitch,
    Blur,
    Underline,
    Strikethrough,
    Italic,
    Highlight,
    Other(String),
}

impl TextEffect {
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Gradient => "gradient",
            Self::Glow => "glow",
            Self::Outline => "outline",
            Self::Shadow => "shadow",
            Self::Emboss => "emboss",
            Self::ThreeD => "3d",
            Self::Retro => "retro",
            Self::Neon => "neon",
            Self::Glitch => "glitch",
            Self::Blur => "blur",
            Self::Underline => "underline",
            Self::Strikethrough => "strikethrough",
            Self::Italic => "italic",
            Self::Highlight => "highlight",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for TextEffect {
    fn from(s: String) -> Self {
        match s.trim() {
            "" | "none" => Self::None,
            "gradient" => Self::Gradient,
            "glow" => Self::Glow,
            "outline" => Self::Outline,
            "shadow" => Self::Shadow,
            "emboss" => Self::Emboss,
            "3d" => Self::ThreeD,
            "retro" => Self::Retro,
            "neon" => Self::Neon,
            "glitch" => Self::Glitch,
            "blur" => Self::Blur,
            "underline" => Self::Underline,
            "strikethrough" => Self::Strikethrough,
            "italic" => Self::Italic,
            "highlight" => Self::Highlight,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<TextEffect> for String {
    fn from(e: TextEffect) -> Self {
        e.as_str().to_owned()
    }
}

/// CSS-driven animation selected for a block. `None` means static.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Animation {
    #[default]
    None,
    Named(String),
}

impl Animation {
    pub fn named(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Named(_))
    }

    /// Class the rendering surface keys its keyframes on, e.g. `animate-float`.
    pub fn class_name(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Named(n) => Some(format!("animate-{n}")),
        }
    }
}

impl From<String> for Animation {
    fn from(s: String) -> Self {
        match s.trim() {
            "" | "none" => Self::None,
            name => Self::Named(name.to_owned()),
        }
    }
}

impl From<Animation> for String {
    fn from(a: Animation) -> Self {
        match a {
            Animation::None => "none".to_owned(),
            Animation::Named(n) => n,
        }
    }
}

/// Background settings for every variant; `kind` selects the active one.
///
/// Inactive variants' fields are retained so toggling `kind` back and forth loses nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    pub color: String,
    pub gradient_start: String,
    pub gradient_end: String,
    /// Degrees, passed through to the rendering surface unclamped.
    pub gradient_angle: f64,
    pub pattern: String,
    pub pattern_background: String,
    pub preset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<String>,
    #[serde(default)]
    pub blur: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur_amount: Option<f64>,
    #[serde(default)]
    pub grayscale: bool,
    #[serde(default)]
    pub overlay: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_opacity: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BackgroundKind {
    Color,
    Gradient,
    Pattern,
    Preset,
    Image,
    Other(String),
}

impl BackgroundKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Color => "color",
            Self::Gradient => "gradient",
            Self::Pattern => "pattern",
            Self::Preset => "preset",
            Self::Image => "image",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for BackgroundKind {
    fn from(s: String) -> Self {
        match s.trim() {
            "color" => Self::Color,
            "gradient" => Self::Gradient,
            "pattern" => Self::Pattern,
            "preset" => Self::Preset,
            "image" => Self::Image,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<BackgroundKind> for String {
    fn from(k: BackgroundKind) -> Self {
        k.as_str().to_owned()
    }
}

/// Borrowed view of the active background variant and only its fields.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActiveBackground<'a> {
    Color {
        color: &'a str,
    },
    Gradient {
        start: &'a str,
        end: &'a str,
        angle: f64,
    },
    Pattern {
        pattern: &'a str,
        background: &'a str,
    },
    Preset {
        preset: &'a str,
    },
    Image {
        url: Option<&'a str>,
        size: Option<&'a str>,
        blur: Option<f64>,
        grayscale: bool,
    },
    Unknown,
}

impl Background {
    pub fn active(&self) -> ActiveBackground<'_> {
        match &self.kind {
            BackgroundKind::Color => ActiveBackground::Color { color: &self.color },
            BackgroundKind::Gradient => ActiveBackground::Gradient {
                start: &self.gradient_start,
                end: &self.gradient_end,
                angle: self.gradient_angle,
            },
            BackgroundKind::Pattern => ActiveBackground::Pattern {
                pattern: &self.pattern,
                background: &self.pattern_background,
            },
            BackgroundKind::Preset => ActiveBackground::Preset {
                preset: &self.preset,
            },
            BackgroundKind::Image => ActiveBackground::Image {
                url: self.image_url.as_deref(),
                size: self.image_size.as_deref(),
                blur: self.blur.then_some(self.blur_amount.unwrap_or(5.0)),
                grayscale: self.grayscale,
            },
            BackgroundKind::Other(_) => ActiveBackground::Unknown,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoShape {
    #[default]
    Square,
    Circle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoPosition {
    #[default]
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    pub visible: bool,
    #[serde(default)]
    pub url: Option<String>,
    pub size: f64,
    #[serde(default)]
    pub shape: LogoShape,
    /// Corner radius in pixels, square logos only.
    #[serde(default)]
    pub border_radius: f64,
    #[serde(default)]
    pub position: LogoPosition,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default)]
    pub animation: Animation,
    #[serde(default)]
    pub shadow: bool,
    #[serde(default)]
    pub border: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Percent, `0..=100`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1280,
                height: 640,
                border_radius: 12.0,
                layout: Layout::Horizontal,
                content_padding: Some(40.0),
                title_subtitle_gap: Some(12.0),
                preview_border: false,
                export_quality: Some(2.0),
                export_format: ExportFormat::Still,
                transparent_background: false,
            },
            title: TextBlock {
                visible: true,
                text: "Project Title".to_owned(),
                font: "Inter, sans-serif".to_owned(),
                size: 48.0,
                weight: 700,
                color: "#ffffff".to_owned(),
                spacing: 12.0,
                shadow: true,
                letter_spacing: None,
                line_height: None,
                transform: None,
                effect: TextEffect::None,
                gradient_start: None,
                gradient_end: None,
                glow_color: None,
                outline_color: None,
                animation: Animation::None,
                offset_x: 0.0,
                offset_y: 0.0,
            },
            subtitle: TextBlock {
                visible: true,
                text: "A short description of your awesome project".to_owned(),
                font: "Inter, sans-serif".to_owned(),
                size: 20.0,
                weight: 400,
                color: "#f8fafc".to_owned(),
                spacing: 8.0,
                shadow: false,
                letter_spacing: None,
                line_height: None,
                transform: None,
                effect: TextEffect::None,
                gradient_start: None,
                gradient_end: None,
                glow_color: None,
                outline_color: None,
                animation: Animation::None,
                offset_x: 0.0,
                offset_y: 0.0,
            },
            background: Background {
                kind: BackgroundKind::Gradient,
                color: "#0f172a".to_owned(),
                gradient_start: "#0ea5e9".to_owned(),
                gradient_end: "#9e3ce7".to_owned(),
                gradient_angle: 135.0,
                pattern: "grid".to_owned(),
                pattern_background: "#f1f5f9".to_owned(),
                preset: "gradient-bluelavender".to_owned(),
                image_url: None,
                image_size: None,
                blur: false,
                blur_amount: None,
                grayscale: false,
                overlay: false,
                overlay_color: None,
                overlay_opacity: None,
            },
            logo: Logo {
                visible: true,
                url: None,
                size: 80.0,
                shape: LogoShape::Square,
                border_radius: 12.0,
                position: LogoPosition::Left,
                offset_x: 0.0,
                offset_y: 0.0,
                object_fit: None,
                filter: None,
                animation: Animation::None,
                shadow: false,
                border: false,
                border_width: None,
                border_color: None,
                opacity: None,
            },
        }
    }
}

impl Configuration {
    /// Parse and validate a configuration from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> BannerResult<Self> {
        let cfg: Self = serde_json::from_reader(r)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> BannerResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BannerError::validation(format!("open configuration '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// `true` when any of title, subtitle or logo runs an animation.
    pub fn has_active_animation(&self) -> bool {
        self.title.animation.is_active()
            || self.subtitle.animation.is_active()
            || self.logo.animation.is_active()
    }

    /// Structural checks for configurations loaded from outside the editor.
    ///
    /// The style compiler does not depend on this; it renders anything.
    pub fn validate(&self) -> BannerResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(BannerError::validation("canvas width/height must be > 0"));
        }
        if let Some(q) = self.canvas.export_quality
            && !(q.is_finite() && q > 0.0)
        {
            return Err(BannerError::validation(
                "exportQuality must be a positive number",
            ));
        }

        let numbers = [
            ("borderRadius", self.canvas.border_radius),
            ("title.size", self.title.size),
            ("title.spacing", self.title.spacing),
            ("title.offsetX", self.title.offset_x),
            ("title.offsetY", self.title.offset_y),
            ("subtitle.size", self.subtitle.size),
            ("subtitle.spacing", self.subtitle.spacing),
            ("subtitle.offsetX", self.subtitle.offset_x),
            ("subtitle.offsetY", self.subtitle.offset_y),
            ("background.gradientAngle", self.background.gradient_angle),
            ("logo.size", self.logo.size),
            ("logo.borderRadius", self.logo.border_radius),
            ("logo.offsetX", self.logo.offset_x),
            ("logo.offsetY", self.logo.offset_y),
        ];
        for (name, v) in numbers {
            if !v.is_finite() {
                return Err(BannerError::validation(format!("{name} must be finite")));
            }
        }

        if self.title.size < 0.0 || self.subtitle.size < 0.0 || self.logo.size < 0.0 {
            return Err(BannerError::validation("sizes must be >= 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
