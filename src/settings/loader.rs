//! Settings loading and hot-reloading.
//! This module provides utilities for loading settings from RON files and watching
//! for changes to enable hot-reloading of settings at runtime.
//!
//! Settings are loaded from RON files in the `data/settings` directory. If multiple
//! RON files are present, the first successfully parsed `Settings` will be used.
//! If no RON files are found or if no parsing succeeds, default settings will be used.
use crate::ron::{load_ron_files, setup_ron_watcher, RonWatcher};
use crate::settings::Settings;
use bevy::log::{info, warn};
use bevy::prelude::{Res, ResMut, Resource};
use std::sync::MutexGuard;

pub const SETTINGS_DIR: &str = "data/settings";

#[derive(Resource)]
pub struct SettingsWatcher {
    watcher: RonWatcher,
    dir: String,
}

/// Load settings from `path` (directory). If multiple `.ron` files are present
/// the first parsed `Settings` will be used. If none exist the `Default` is used.
/// Gameplay tunables are clamped to their allowed ranges.
///
/// # Example
/// ```no_run
/// let settings = streamline::settings::loader::load_settings_from_dir("data/settings");
/// ```
#[must_use]
pub fn load_settings_from_dir(path: &str) -> Settings {
    let items: Vec<Settings> = load_ron_files(path);
    if let Some(first) = items.into_iter().next() {
        first.sanitized()
    } else {
        info!("no settings found in {path}, using defaults");
        Settings::defaults()
    }
}

/// Create a watcher for the settings directory (hot-reload).
///
/// # Errors
/// Returns a `notify::Error` if the directory cannot be watched.
pub fn setup_settings_watcher(path: &str) -> Result<SettingsWatcher, notify::Error> {
    setup_ron_watcher(path).map(|watcher| SettingsWatcher {
        watcher,
        dir: path.to_string(),
    })
}

impl SettingsWatcher {
    /// A watcher that never reports changes, used when the OS watcher is unavailable.
    #[must_use]
    pub fn stub() -> Self {
        SettingsWatcher {
            watcher: RonWatcher::stub(),
            dir: SETTINGS_DIR.to_string(),
        }
    }

    /// Consume the pending change flag, returning whether a reload is due.
    pub fn take_changed(&self) -> bool {
        let mut flag: MutexGuard<'_, bool> = match self.watcher.changed.lock() {
            Ok(flag) => flag,
            Err(poisoned) => {
                warn!("settings watcher mutex poisoned, recovering");
                poisoned.into_inner()
            }
        };
        std::mem::take(&mut *flag)
    }
}

/// Check for changes and reload the settings resource when files change.
///
/// Controls and graphics take effect immediately; gameplay tunables are read
/// by the character at spawn and apply to the next one.
#[allow(clippy::needless_pass_by_value)]
pub fn check_settings_changes(watcher: Res<SettingsWatcher>, mut settings: ResMut<Settings>) {
    if watcher.take_changed() {
        info!("settings changed, reloading (gameplay tunables apply on next spawn)");
        *settings = load_settings_from_dir(&watcher.dir);
    }
}
