use super::*;
use crate::scene::model::{BackgroundKind, Layout};

#[test]
fn new_session_starts_on_a_startup_preset() {
    let s = EditorSession::new(Configuration::default(), 42);
    assert_eq!(s.config().background.kind, BackgroundKind::Preset);
    assert!(STARTUP_PRESETS.contains(&s.config().background.preset.as_str()));
    assert!(!s.can_undo());
    assert!(!s.can_redo());
    assert_eq!(s.history().current(), *s.config());
}

#[test]
fn edits_are_undoable() {
    let mut s = EditorSession::with_config(Configuration::default(), 1);
    s.update_config(ConfigPatch {
        width: Some(800),
        ..ConfigPatch::default()
    });
    s.update_with(|c| c.canvas.layout = Layout::Vertical);
    assert_eq!(s.config().canvas.width, 800);

    let back = s.undo().unwrap();
    assert_eq!(back.canvas.layout, Layout::Horizontal);
    assert_eq!(s.config(), &back);
    assert_eq!(s.undo().unwrap(), Configuration::default());
    assert!(s.undo().is_none());

    assert_eq!(s.redo().unwrap().canvas.width, 800);
    assert!(s.can_redo());
}

#[test]
fn template_is_a_committed_edit() {
    let mut s = EditorSession::with_config(Configuration::default(), 1);
    s.apply_template("dark").unwrap();
    assert_eq!(s.config().background.kind, BackgroundKind::Color);
    assert_eq!(s.config().background.color, "#0f172a");
    assert!(s.can_undo());

    let err = s.apply_template("nope").unwrap_err();
    assert!(err.to_string().contains("unknown template"));
    assert_eq!(s.history().len(), 2);
}

#[test]
fn random_style_and_preset_push_history() {
    let mut s = EditorSession::with_config(Configuration::default(), 5);
    s.apply_random_style();
    assert_eq!(s.config().background.kind, BackgroundKind::Gradient);
    s.apply_random_preset();
    assert!(RANDOM_STYLE_PRESETS.contains(&s.config().background.preset.as_str()));
    assert_eq!(s.history().len(), 3);
}

#[test]
fn reset_returns_to_initial_and_can_be_undone() {
    let mut s = EditorSession::with_config(Configuration::default(), 1);
    s.update_with(|c| c.title.text = "changed".to_owned());
    s.reset();
    assert_eq!(s.config(), &Configuration::default());
    assert_eq!(s.undo().unwrap().title.text, "changed");
}

#[test]
fn style_tree_tracks_live_config() {
    let mut s = EditorSession::with_config(Configuration::default(), 1);
    s.update_with(|c| c.title.visible = false);
    assert!(s.style_tree().title.is_none());
    s.undo();
    assert!(s.style_tree().title.is_some());
}
