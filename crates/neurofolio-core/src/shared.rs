//! Shared settings handle.

use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::Settings;

/// Settings shared between the control surface and the renderer.
///
/// Cloning the handle shares the same underlying settings. The control surface
/// writes through [`SharedSettings::update`]; readers take a copy every frame
/// with [`SharedSettings::snapshot`].
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<RwLock<Settings>>,
}

impl SharedSettings {
    /// Share the given settings, clamped into range.
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings.clamped())),
        }
    }

    /// Copy of the current settings.
    pub fn snapshot(&self) -> Settings {
        match self.inner.read() {
            Ok(settings) => *settings,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Mutate the settings in place and return the new values.
    pub fn update(&self, f: impl FnOnce(&mut Settings)) -> Settings {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("settings lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        f(&mut guard);
        *guard = guard.clamped();
        *guard
    }
}
