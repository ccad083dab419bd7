use crate::compile::compiler::compile_style;
use crate::compile::style::StyleTree;
use crate::foundation::error::{BannerError, BannerResult};
use crate::foundation::rng::Rng64;
use crate::history::HistoryManager;
use crate::scene::model::Configuration;
use crate::scene::patch::ConfigPatch;
use crate::scene::templates::{
    RANDOM_STYLE_PRESETS, STARTUP_PRESETS, apply_random_preset, random_style, template,
};

/// The live configuration plus its undo history.
///
/// Every mutating call is a committed edit: it updates the configuration and pushes one
/// snapshot. Undo and redo replace the live configuration with the restored snapshot.
#[derive(Clone, Debug)]
pub struct EditorSession {
    config: Configuration,
    initial: Configuration,
    history: HistoryManager,
    rng: Rng64,
}

impl EditorSession {
    /// Start a session; one startup preset is picked for the background.
    pub fn new(initial: Configuration, seed: u64) -> Self {
        let mut rng = Rng64::new(seed);
        let mut config = initial.clone();
        apply_random_preset(&mut rng, &mut config, &STARTUP_PRESETS);
        tracing::debug!(preset = %config.background.preset, "editor session started");

        Self {
            history: HistoryManager::new(&config),
            config,
            initial,
            rng,
        }
    }

    /// Start from an exact configuration, without the startup preset.
    pub fn with_config(config: Configuration, seed: u64) -> Self {
        Self {
            history: HistoryManager::new(&config),
            initial: config.clone(),
            config,
            rng: Rng64::new(seed),
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Merge `patch` and commit.
    pub fn update_config(&mut self, patch: ConfigPatch) {
        patch.apply(&mut self.config);
        self.commit();
    }

    /// Edit in place and commit.
    pub fn update_with(&mut self, edit: impl FnOnce(&mut Configuration)) {
        edit(&mut self.config);
        self.commit();
    }

    pub fn undo(&mut self) -> Option<Configuration> {
        let restored = self.history.undo()?;
        self.config = restored.clone();
        Some(restored)
    }

    pub fn redo(&mut self) -> Option<Configuration> {
        let restored = self.history.redo()?;
        self.config = restored.clone();
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn apply_template(&mut self, name: &str) -> BannerResult<()> {
        let cfg = template(name)
            .ok_or_else(|| BannerError::validation(format!("unknown template: {name}")))?;
        self.update_config(ConfigPatch::replace_all(cfg));
        Ok(())
    }

    pub fn apply_random_style(&mut self) {
        let next = random_style(&mut self.rng, &self.config);
        self.config = next;
        self.commit();
    }

    pub fn apply_random_preset(&mut self) {
        apply_random_preset(&mut self.rng, &mut self.config, &RANDOM_STYLE_PRESETS);
        self.commit();
    }

    /// Back to the configuration the session was created from.
    pub fn reset(&mut self) {
        self.config = self.initial.clone();
        self.commit();
    }

    pub fn style_tree(&self) -> StyleTree {
        compile_style(&self.config)
    }

    fn commit(&mut self) {
        self.history.push(&self.config);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
