//! bannerkit designs repository header banners.
//!
//! A header is a declarative [`Configuration`]. The crate provides:
//!
//! - [`compile_style`]: a pure mapping from configuration to a [`StyleTree`]
//! - [`EditorSession`]: live editing with bounded undo/redo ([`HistoryManager`])
//! - [`ExportOrchestrator`]: still (PNG) and animated (GIF) export through a [`Rasterizer`]
//!   and an [`EncoderFactory`]
#![forbid(unsafe_code)]

pub mod compile;
pub mod encode;
pub mod export;
pub mod foundation;
pub mod history;
pub mod raster;
pub mod scene;
pub mod session;

pub use crate::compile::compiler::compile_style;
pub use crate::compile::style::{Style, StyleNode, StyleTree};
pub use crate::encode::{
    AnimationEncoder, EncodeJob, EncoderConfig, EncoderFactory, FrameOptions, GifEncoder,
    GifEncoderFactory, encode_png,
};
pub use crate::export::{
    Artifact, ArtifactKind, Clock, ExportNote, ExportOptions, ExportOrchestrator, ExportOutcome,
    ExportReport, ExportState, SystemClock, markdown_snippet, suggested_file_name,
};
pub use crate::foundation::core::{RasterImage, Rgba8};
pub use crate::foundation::error::{BannerError, BannerResult};
pub use crate::foundation::rng::Rng64;
pub use crate::history::{History, HistoryManager};
pub use crate::raster::{CaptureOptions, CpuRasterizer, Rasterizer};
pub use crate::scene::model::{Configuration, ExportFormat};
pub use crate::scene::patch::ConfigPatch;
pub use crate::scene::templates::{TEMPLATE_IDS, random_style, template};
pub use crate::session::{EditorSession, Onboarding};
