//! Utilities for loading RON files and watching directories for changes.
//!
//! `load_ron_files` reads every `.ron` file in a directory; `RonWatcher`
//! raises a shared flag when a file in the watched directory is modified.
//! Together they back hot-reload of the settings during development.

use bevy::log::{error, warn};
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// File-watcher handle for RON hot-reload.
pub struct RonWatcher {
    pub changed: Arc<Mutex<bool>>, // Shared boolean set to `true` when watched files change.
    _watcher: Option<RecommendedWatcher>, // watcher handle kept to prevent immediate drop.
}

impl RonWatcher {
    /// Create a stub `RonWatcher` that does not have an active OS watcher.
    ///
    /// `changed` starts `false` and is never set. Useful as a fallback when
    /// watcher creation fails.
    #[must_use]
    pub fn stub() -> Self {
        RonWatcher {
            changed: Arc::new(Mutex::new(false)),
            _watcher: None,
        }
    }
}

/// Load all `.ron` files from a directory and deserialize them into `T`.
///
/// Files are visited in file-name order. Files that fail to parse are
/// skipped with a warning; a missing directory yields an empty `Vec`.
#[must_use]
pub fn load_ron_files<T: DeserializeOwned>(path: &str) -> Vec<T> {
    let Ok(entries) = std::fs::read_dir(path) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    files.sort();

    let mut items = Vec::new();
    for file in files {
        match std::fs::read_to_string(&file) {
            Ok(content) => match ron::from_str::<T>(&content) {
                Ok(item) => items.push(item),
                Err(e) => warn!("failed to parse {}: {e}", file.display()),
            },
            Err(e) => warn!("failed to read {}: {e}", file.display()),
        }
    }

    items
}

/// Create a `RonWatcher` that watches a directory for modifications.
///
/// # Errors
/// Returns a `notify::Error` if the underlying file-watcher cannot be
/// created or the watcher cannot be registered for the provided path.
pub fn setup_ron_watcher(path: &str) -> Result<RonWatcher, notify::Error> {
    let changed = Arc::new(Mutex::new(false));
    let changed_clone = changed.clone();
    // Canonical form so events from symlinked or relative paths still match.
    let watched_path: PathBuf = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, notify::EventKind::Modify(_)) {
                    return;
                }
                let relevant = event.paths.iter().any(|p| {
                    std::fs::canonicalize(p)
                        .unwrap_or_else(|_| p.clone())
                        .starts_with(&watched_path)
                });
                if relevant {
                    let mut flag = changed_clone
                        .lock()
                        .unwrap_or_else(std::sync::PoisonError::into_inner);
                    *flag = true;
                }
            }
            Err(e) => error!("watch error: {e:?}"),
        },
        Config::default(),
    )?;

    watcher.watch(Path::new(path), RecursiveMode::NonRecursive)?;
    Ok(RonWatcher { changed, _watcher: Some(watcher) })
}
