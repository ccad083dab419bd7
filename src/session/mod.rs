pub mod editor;
pub mod onboarding;

pub use editor::EditorSession;
pub use onboarding::Onboarding;
