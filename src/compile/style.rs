use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

/// Flat set of CSS properties, kept sorted so output is byte-stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<&'static str, String>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, prop: &'static str, value: impl Into<String>) -> &mut Self {
        self.0.insert(prop, value.into());
        self
    }

    pub fn get(&self, prop: &str) -> Option<&str> {
        self.0.get(prop).map(String::as_str)
    }

    pub fn contains(&self, prop: &str) -> bool {
        self.0.contains_key(prop)
    }

    pub fn remove(&mut self, prop: &str) -> Option<String> {
        self.0.remove(prop)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Overlay every property of `other` onto `self`.
    pub fn extend(&mut self, other: Style) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `prop: value;` declarations separated by single spaces.
    pub fn to_declarations(&self) -> String {
        let mut out = String::new();
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{k}: {v};");
        }
        out
    }
}

/// One element of the rendered header: inline style plus class hooks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StyleNode {
    pub style: Style,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
}

impl StyleNode {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            classes: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextNode {
    pub text: String,
    pub wrapper: Style,
    pub node: StyleNode,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogoNode {
    pub src: String,
    pub wrapper: StyleNode,
    pub image: StyleNode,
}

/// Compiled, ready-to-render header.
///
/// Invisible blocks are absent (`None`), not styled transparent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StyleTree {
    pub container: StyleNode,
    pub background: StyleNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<StyleNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<StyleNode>,
    pub content: StyleNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoNode>,
    pub text_column: StyleNode,
    pub text_group: StyleNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TextNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<TextNode>,
}

impl StyleTree {
    /// Every node with a stable selector-like name, in document order.
    pub fn nodes(&self) -> Vec<(&'static str, &StyleNode)> {
        let mut out = vec![
            ("container", &self.container),
            ("background", &self.background),
        ];
        if let Some(n) = &self.overlay {
            out.push(("overlay", n));
        }
        if let Some(n) = &self.pattern {
            out.push(("pattern", n));
        }
        out.push(("content", &self.content));
        if let Some(l) = &self.logo {
            out.push(("logo-wrapper", &l.wrapper));
            out.push(("logo", &l.image));
        }
        out.push(("text-column", &self.text_column));
        out.push(("text-group", &self.text_group));
        if let Some(t) = &self.title {
            out.push(("title", &t.node));
        }
        if let Some(t) = &self.subtitle {
            out.push(("subtitle", &t.node));
        }
        out
    }

    /// Render as CSS rule blocks, one per node.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        for (name, node) in self.nodes() {
            let _ = writeln!(out, ".{name} {{");
            for (k, v) in node.style.iter() {
                let _ = writeln!(out, "  {k}: {v};");
            }
            out.push_str("}\n");
            if !node.classes.is_empty() {
                let _ = writeln!(out, "/* .{name} classes: {} */", node.classes.join(" "));
            }
        }
        out
    }
}
