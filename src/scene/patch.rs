use serde::{Deserialize, Deserializer, Serialize};

use crate::scene::model::{Background, Configuration, ExportFormat, Layout, Logo, TextBlock};

/// Partial update to a [`Configuration`].
///
/// Merging is shallow: a present sub-record (`title`, `background`, ...) replaces the current
/// one wholesale, matching how the form controls emit edits.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    /// `Some(None)` (JSON `null`) clears the value back to its default.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub content_padding: Option<Option<f64>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub title_subtitle_gap: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_border: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub export_quality: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_format: Option<ExportFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparent_background: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TextBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<TextBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
}

/// A field that is present maps to `Some`, even when its value is `null`.
fn present<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply onto `cfg` in place.
    pub fn apply(self, cfg: &mut Configuration) {
        let c = &mut cfg.canvas;
        if let Some(v) = self.width {
            c.width = v;
        }
        if let Some(v) = self.height {
            c.height = v;
        }
        if let Some(v) = self.border_radius {
            c.border_radius = v;
        }
        if let Some(v) = self.layout {
            c.layout = v;
        }
        if let Some(v) = self.content_padding {
            c.content_padding = v;
        }
        if let Some(v) = self.title_subtitle_gap {
            c.title_subtitle_gap = v;
        }
        if let Some(v) = self.preview_border {
            c.preview_border = v;
        }
        if let Some(v) = self.export_quality {
            c.export_quality = v;
        }
        if let Some(v) = self.export_format {
            c.export_format = v;
        }
        if let Some(v) = self.transparent_background {
            c.transparent_background = v;
        }
        if let Some(v) = self.title {
            cfg.title = v;
        }
        if let Some(v) = self.subtitle {
            cfg.subtitle = v;
        }
        if let Some(v) = self.background {
            cfg.background = v;
        }
        if let Some(v) = self.logo {
            cfg.logo = v;
        }
    }

    /// Patch that replaces every field with `cfg`'s values (templates, reset).
    pub fn replace_all(cfg: Configuration) -> Self {
        let Configuration {
            canvas,
            title,
            subtitle,
            background,
            logo,
        } = cfg;
        Self {
            width: Some(canvas.width),
            height: Some(canvas.height),
            border_radius: Some(canvas.border_radius),
            layout: Some(canvas.layout),
            content_padding: Some(canvas.content_padding),
            title_subtitle_gap: Some(canvas.title_subtitle_gap),
            preview_border: Some(canvas.preview_border),
            export_quality: Some(canvas.export_quality),
            export_format: Some(canvas.export_format),
            transparent_background: Some(canvas.transparent_background),
            title: Some(title),
            subtitle: Some(subtitle),
            background: Some(background),
            logo: Some(logo),
        }
    }
}
