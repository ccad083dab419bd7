//! Still and animated export of the rendered header.

pub mod artifact;
pub mod clock;
pub mod orchestrator;

pub use artifact::{Artifact, ArtifactKind, markdown_snippet, suggested_file_name};
pub use clock::{Clock, SystemClock};
pub use orchestrator::{
    ExportNote, ExportOptions, ExportOrchestrator, ExportOutcome, ExportReport, ExportState,
};
