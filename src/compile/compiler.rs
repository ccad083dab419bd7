use crate::compile::style::{LogoNode, Style, StyleNode, StyleTree, TextNode};
use crate::scene::model::{
    ActiveBackground, Background, Configuration, Layout, Logo, LogoPosition, LogoShape, TextBlock,
    TextEffect,
};

pub const DEFAULT_CONTENT_PADDING: f64 = 40.0;
pub const DEFAULT_TITLE_SUBTITLE_GAP: f64 = 12.0;
pub const DEFAULT_OBJECT_FIT: &str = "cover";
pub const DEFAULT_LOGO_OPACITY: f64 = 100.0;
pub const DEFAULT_OVERLAY_COLOR: &str = "rgba(0, 0, 0, 0.3)";
pub const DEFAULT_OVERLAY_OPACITY: f64 = 30.0;
pub const DEFAULT_IMAGE_SIZE: &str = "cover";
pub const DEFAULT_TITLE_TEXT: &str = "Project Title";
pub const DEFAULT_SUBTITLE_TEXT: &str = "A short description of your awesome project";
pub const LOGO_PLACEHOLDER: &str = "/placeholder.svg?height=80&width=80&query=project logo";

const CONTENT_GAP_PX: f64 = 24.0;
const TRANSITION: &str = "all 0.3s ease";

const DEFAULT_GRADIENT_START: &str = "#0ea5e9";
const DEFAULT_GRADIENT_END: &str = "#9e3ce7";
const DEFAULT_GLOW_STRONG: &str = "rgba(56, 189, 248, 0.7)";
const DEFAULT_GLOW_SOFT: &str = "rgba(56, 189, 248, 0.5)";
const DEFAULT_NEON: &str = "#0fa";
const DEFAULT_RETRO: &str = "#ff00ff";
const DEFAULT_OUTLINE: &str = "#000000";

/// Which text block is being compiled; effects are tuned per role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Subtitle,
}

/// Compile a configuration into its style tree.
///
/// Total and deterministic: absent optional fields resolve to the `DEFAULT_*` constants and
/// unknown discriminants resolve to empty styles.
pub fn compile_style(cfg: &Configuration) -> StyleTree {
    StyleTree {
        container: container_node(cfg),
        background: background_node(&cfg.background),
        overlay: overlay_node(&cfg.background),
        pattern: pattern_node(&cfg.background),
        content: content_node(cfg),
        logo: cfg.logo.visible.then(|| logo_node(&cfg.logo)),
        text_column: text_column_node(cfg.logo.position),
        text_group: text_group_node(cfg),
        title: cfg
            .title
            .visible
            .then(|| text_node(&cfg.title, TextRole::Title)),
        subtitle: cfg
            .subtitle
            .visible
            .then(|| text_node(&cfg.subtitle, TextRole::Subtitle)),
    }
}

fn px(v: f64) -> String {
    format!("{v}px")
}

/// `translate(..)` only when something actually moves, so animation transforms on the same
/// element are left alone.
fn offset_transform(x: f64, y: f64) -> Option<String> {
    (x != 0.0 || y != 0.0).then(|| format!("translate({x}px, {y}px)"))
}

fn container_node(cfg: &Configuration) -> StyleNode {
    let c = &cfg.canvas;
    let mut s = Style::new();
    s.set("width", px(f64::from(c.width)))
        .set("height", px(f64::from(c.height)))
        .set("border-radius", px(c.border_radius))
        .set("overflow", "hidden")
        .set("position", "relative");

    let border = if c.preview_border { "border" } else { "border-0" };
    StyleNode::new(s)
        .with_class("canvas-container")
        .with_class(border)
}

/// Exactly one branch per background kind; everything else contributes nothing.
pub fn background_node(bg: &Background) -> StyleNode {
    let mut s = Style::new();
    let mut classes = Vec::new();

    match bg.active() {
        ActiveBackground::Color { color } => {
            s.set("background-color", color);
        }
        ActiveBackground::Gradient { start, end, angle } => {
            s.set(
                "background",
                format!("linear-gradient({angle}deg, {start} 0%, {end} 100%)"),
            );
        }
        ActiveBackground::Preset { preset } => {
            classes.push(preset.to_owned());
        }
        ActiveBackground::Pattern {
            pattern,
            background,
        } => {
            classes.push(format!("pattern-{pattern}"));
            s.set("background-color", background);
        }
        ActiveBackground::Image {
            url: Some(url),
            size,
            blur,
            grayscale,
        } => {
            s.set("background-image", format!("url({url})"))
                .set("background-size", size.unwrap_or(DEFAULT_IMAGE_SIZE))
                .set("background-position", "center")
                .set("background-repeat", "no-repeat");

            let mut filters = Vec::new();
            if let Some(amount) = blur {
                filters.push(format!("blur({amount}px)"));
            }
            if grayscale {
                filters.push("grayscale(100%)".to_owned());
            }
            if !filters.is_empty() {
                s.set("filter", filters.join(" "));
            }
        }
        ActiveBackground::Image { url: None, .. } | ActiveBackground::Unknown => {}
    }

    StyleNode { style: s, classes }
}

fn overlay_node(bg: &Background) -> Option<StyleNode> {
    if !bg.overlay {
        return None;
    }
    let mut s = absolute_fill(1);
    s.set(
        "background-color",
        bg.overlay_color.as_deref().unwrap_or(DEFAULT_OVERLAY_COLOR),
    )
    .set(
        "opacity",
        (bg.overlay_opacity.unwrap_or(DEFAULT_OVERLAY_OPACITY) / 100.0).to_string(),
    );
    Some(StyleNode::new(s))
}

fn pattern_node(bg: &Background) -> Option<StyleNode> {
    let ActiveBackground::Pattern { pattern, .. } = bg.active() else {
        return None;
    };
    Some(StyleNode::new(absolute_fill(1)).with_class(format!("pattern-{pattern}")))
}

fn absolute_fill(z: i32) -> Style {
    let mut s = Style::new();
    s.set("position", "absolute")
        .set("top", "0")
        .set("left", "0")
        .set("right", "0")
        .set("bottom", "0")
        .set("z-index", z.to_string());
    s
}

fn content_node(cfg: &Configuration) -> StyleNode {
    let padding = cfg
        .canvas
        .content_padding
        .unwrap_or(DEFAULT_CONTENT_PADDING);
    let direction = match cfg.canvas.layout {
        Layout::Horizontal => "row",
        Layout::Vertical => "column",
    };

    let mut s = Style::new();
    s.set("width", "100%")
        .set("height", "100%")
        .set("padding", px(padding))
        .set("display", "flex")
        .set("flex-direction", direction)
        .set("align-items", "center")
        .set("gap", px(CONTENT_GAP_PX))
        .set("position", "relative")
        .set("z-index", "2");
    StyleNode::new(s)
}

fn logo_node(logo: &Logo) -> LogoNode {
    let size = px(logo.size);

    let mut wrapper = Style::new();
    wrapper
        .set(
            "order",
            match logo.position {
                LogoPosition::Left => "0",
                LogoPosition::Right => "1",
            },
        )
        .set("display", "flex")
        .set("justify-content", "center")
        .set("align-items", "center")
        .set("transition", TRANSITION)
        // The logo never collapses, whatever the text beside it does.
        .set("min-width", size.clone())
        .set("min-height", size.clone());
    if let Some(t) = offset_transform(logo.offset_x, logo.offset_y) {
        wrapper.set("transform", t);
    }
    let mut wrapper = StyleNode::new(wrapper);
    if let Some(class) = logo.animation.class_name() {
        wrapper.classes.push(class);
    }

    let radius = match logo.shape {
        LogoShape::Circle => "50%".to_owned(),
        LogoShape::Square => px(logo.border_radius),
    };
    let border = if logo.border {
        format!(
            "{}px solid {}",
            logo.border_width.unwrap_or(2.0),
            logo.border_color.as_deref().unwrap_or("#ffffff")
        )
    } else {
        "none".to_owned()
    };
    let opacity = logo.opacity.unwrap_or(DEFAULT_LOGO_OPACITY) / 100.0;

    let mut image = Style::new();
    image
        .set("width", size.clone())
        .set("height", size)
        .set("border-radius", radius)
        .set(
            "object-fit",
            logo.object_fit.as_deref().unwrap_or(DEFAULT_OBJECT_FIT),
        )
        .set("object-position", "center")
        .set(
            "box-shadow",
            if logo.shadow {
                "0 4px 12px rgba(0, 0, 0, 0.15)"
            } else {
                "none"
            },
        )
        .set("border", border)
        .set("transition", TRANSITION)
        .set("opacity", opacity.to_string())
        .set("max-width", "none")
        .set("max-height", "none");
    let mut image = StyleNode::new(image);
    if let Some(filter) = logo.filter.as_deref().filter(|f| !f.is_empty() && *f != "none") {
        image.classes.push(format!("filter-{filter}"));
    }

    LogoNode {
        src: logo
            .url
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| LOGO_PLACEHOLDER.to_owned()),
        wrapper,
        image,
    }
}

fn text_column_node(logo_position: LogoPosition) -> StyleNode {
    let mut s = Style::new();
    s.set("flex", "1")
        .set(
            "order",
            match logo_position {
                LogoPosition::Left => "1",
                LogoPosition::Right => "0",
            },
        )
        .set("z-index", "2")
        .set("position", "relative")
        .set("display", "flex")
        .set("flex-direction", "column")
        .set("justify-content", "center");
    StyleNode::new(s)
}

/// Gap between title and subtitle: explicit gap, then the title's spacing, then the default.
pub fn title_subtitle_gap(cfg: &Configuration) -> f64 {
    cfg.canvas
        .title_subtitle_gap
        .or((cfg.title.spacing > 0.0).then_some(cfg.title.spacing))
        .unwrap_or(DEFAULT_TITLE_SUBTITLE_GAP)
}

fn text_group_node(cfg: &Configuration) -> StyleNode {
    let (direction, align) = match cfg.canvas.layout {
        Layout::Vertical => ("column", "flex-start"),
        Layout::Horizontal => ("row", "baseline"),
    };
    let mut s = Style::new();
    s.set("display", "flex")
        .set("flex-direction", direction)
        .set("align-items", align)
        .set("gap", px(title_subtitle_gap(cfg)))
        .set("position", "relative")
        .set("width", "100%");
    StyleNode::new(s)
}

fn text_node(block: &TextBlock, role: TextRole) -> TextNode {
    let mut wrapper = Style::new();
    wrapper.set("position", "relative").set(
        "z-index",
        match role {
            TextRole::Title => "2",
            TextRole::Subtitle => "1",
        },
    );

    let mut node = StyleNode::new(text_style(block, role));
    if let Some(class) = block.animation.class_name() {
        node.classes.push(class);
    }
    if block.effect == TextEffect::Glitch {
        node.classes.push("glitch".to_owned());
    }

    let text = if block.text.is_empty() {
        match role {
            TextRole::Title => DEFAULT_TITLE_TEXT,
            TextRole::Subtitle => DEFAULT_SUBTITLE_TEXT,
        }
        .to_owned()
    } else {
        block.text.clone()
    };

    TextNode {
        text,
        wrapper,
        node,
    }
}

/// Base typography followed by the effect bundle, which overrides what it names.
pub fn text_style(block: &TextBlock, role: TextRole) -> Style {
    let (shadow, line_height) = match role {
        TextRole::Title => ("0 2px 4px rgba(0,0,0,0.2)", "1.2"),
        TextRole::Subtitle => ("0 1px 2px rgba(0,0,0,0.2)", "1.5"),
    };

    let mut s = Style::new();
    s.set("margin", "0")
        .set("font-size", px(block.size))
        .set("font-weight", block.weight.to_string())
        .set("color", block.color.clone())
        .set("font-family", block.font.clone())
        .set("text-shadow", if block.shadow { shadow } else { "none" })
        .set(
            "letter-spacing",
            block.letter_spacing.as_deref().unwrap_or("normal"),
        )
        .set(
            "line-height",
            block.line_height.as_deref().unwrap_or(line_height),
        )
        .set("text-transform", block.transform.as_deref().unwrap_or("none"))
        .set("transition", TRANSITION)
        .set("position", "relative");
    if role == TextRole::Subtitle {
        s.set("opacity", "0.9");
    }
    if let Some(t) = offset_transform(block.offset_x, block.offset_y) {
        s.set("transform", t);
    }

    s.extend(effect_bundle(block, role));
    s
}

/// Properties contributed by the block's effect, and nothing else.
pub fn effect_bundle(block: &TextBlock, role: TextRole) -> Style {
    let title = role == TextRole::Title;
    let glow = block.glow_color.as_deref();
    let outline = block.outline_color.as_deref();

    let mut s = Style::new();
    match &block.effect {
        TextEffect::Gradient => {
            s.set(
                "background",
                format!(
                    "linear-gradient(to right, {}, {})",
                    block
                        .gradient_start
                        .as_deref()
                        .unwrap_or(DEFAULT_GRADIENT_START),
                    block.gradient_end.as_deref().unwrap_or(DEFAULT_GRADIENT_END)
                ),
            )
            .set("-webkit-background-clip", "text")
            .set("-webkit-text-fill-color", "transparent")
            .set("background-clip", "text");
        }
        TextEffect::Glow => {
            let (near, far) = if title { (10, 20) } else { (5, 10) };
            s.set(
                "text-shadow",
                format!(
                    "0 0 {near}px {}, 0 0 {far}px {}",
                    glow.unwrap_or(DEFAULT_GLOW_STRONG),
                    glow.unwrap_or(DEFAULT_GLOW_SOFT)
                ),
            );
        }
        // Subtitles have no outline treatment.
        TextEffect::Outline if title => {
            s.set(
                "-webkit-text-stroke",
                format!("1px {}", outline.unwrap_or(DEFAULT_OUTLINE)),
            );
            let color = if block.color.is_empty() {
                "#ffffff".to_owned()
            } else {
                block.color.clone()
            };
            s.set("color", color);
        }
        TextEffect::Shadow => {
            s.set(
                "text-shadow",
                if title {
                    "2px 2px 4px rgba(0, 0, 0, 0.5)"
                } else {
                    "1px 1px 3px rgba(0, 0, 0, 0.5)"
                },
            );
        }
        TextEffect::Emboss => {
            s.set(
                "text-shadow",
                "0px 1px 1px rgba(255, 255, 255, 0.5), 0px -1px 1px rgba(0, 0, 0, 0.5)",
            );
        }
        TextEffect::ThreeD => {
            let layers = if title {
                "1px 1px 0px #ccc, 2px 2px 0px #ccc, 3px 3px 0px #ccc, 4px 4px 0px #ccc, \
                 5px 5px 0px #ccc, 6px 6px 10px rgba(0, 0, 0, 0.2)"
            } else {
                "1px 1px 0px #ccc, 2px 2px 0px #ccc, 3px 3px 5px rgba(0, 0, 0, 0.2)"
            };
            s.set("text-shadow", layers);
        }
        TextEffect::Retro => {
            let (depth, spacing) = if title { (3, "2px") } else { (2, "1px") };
            s.set(
                "text-shadow",
                format!(
                    "{depth}px {depth}px 0px {}",
                    outline.unwrap_or(DEFAULT_RETRO)
                ),
            )
            .set("letter-spacing", spacing);
        }
        TextEffect::Neon => {
            let g = glow.unwrap_or(DEFAULT_NEON);
            let shadow = if title {
                format!("0 0 5px #fff, 0 0 10px #fff, 0 0 15px {g}, 0 0 20px {g}, 0 0 25px {g}")
            } else {
                format!("0 0 5px #fff, 0 0 10px {g}, 0 0 15px {g}")
            };
            s.set("text-shadow", shadow);
        }
        TextEffect::Glitch => {
            s.set("position", "relative");
        }
        TextEffect::Blur => {
            s.set("filter", if title { "blur(1px)" } else { "blur(0.5px)" });
        }
        TextEffect::Underline => {
            s.set("text-decoration", "underline");
        }
        TextEffect::Strikethrough => {
            s.set("text-decoration", "line-through");
        }
        TextEffect::Italic => {
            s.set("font-style", "italic");
        }
        TextEffect::Highlight => {
            s.set("background-color", "rgba(250, 204, 21, 0.35)")
                .set("padding", "0 0.2em")
                .set("border-radius", "4px");
        }
        TextEffect::None | TextEffect::Outline | TextEffect::Other(_) => {}
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
