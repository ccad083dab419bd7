use std::sync::atomic::{AtomicBool, Ordering};

/// First-run flag for the welcome tooltip.
///
/// Owned by whoever scopes the "process" (the app, a test); there is no global instance.
#[derive(Debug)]
pub struct Onboarding {
    visited: AtomicBool,
}

impl Default for Onboarding {
    fn default() -> Self {
        Self::new()
    }
}

impl Onboarding {
    pub const fn new() -> Self {
        Self {
            visited: AtomicBool::new(false),
        }
    }

    /// A flag for a user who has already been greeted.
    pub const fn visited() -> Self {
        Self {
            visited: AtomicBool::new(true),
        }
    }

    /// `true` for the first caller only.
    pub fn take_first_visit(&self) -> bool {
        !self.visited.swap(true, Ordering::AcqRel)
    }

    pub fn has_visited(&self) -> bool {
        self.visited.load(Ordering::Acquire)
    }
}
