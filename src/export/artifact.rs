use crate::scene::model::Configuration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Still,
    Animated,
}

impl ArtifactKind {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Still => "image/png",
            Self::Animated => "image/gif",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Still => "png",
            Self::Animated => "gif",
        }
    }
}

/// Final exported bytes, opaque to everything downstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub bytes: Vec<u8>,
    /// Pixel size of the encoded image.
    pub width: u32,
    pub height: u32,
    pub frame_count: u32,
}

impl Artifact {
    pub fn mime_type(&self) -> &'static str {
        self.kind.mime_type()
    }

    pub fn extension(&self) -> &'static str {
        self.kind.extension()
    }
}

const FALLBACK_FILE_STEM: &str = "github-header";
const FALLBACK_ALT_TEXT: &str = "GitHub Header";

/// `<title>.<ext>`, or `github-header.<ext>` for an empty title.
///
/// Path separators in the title are replaced so the name stays a single component.
pub fn suggested_file_name(cfg: &Configuration, kind: ArtifactKind) -> String {
    let title = cfg.title.text.trim();
    let stem = if title.is_empty() {
        FALLBACK_FILE_STEM.to_owned()
    } else {
        title
            .chars()
            .map(|c| if matches!(c, '/' | '\\') || c.is_control() { '-' } else { c })
            .collect()
    };
    format!("{stem}.{}", kind.extension())
}

/// Markdown image reference for a README.
pub fn markdown_snippet(cfg: &Configuration, file_name: &str) -> String {
    let alt = cfg.title.text.trim();
    let alt = if alt.is_empty() { FALLBACK_ALT_TEXT } else { alt };
    format!("![{alt}]({file_name})")
}
