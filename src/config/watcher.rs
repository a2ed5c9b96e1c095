//! Configuration file watcher for live level changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::{load_config, ConfigError};
use crate::logger::level::AtomicLevel;

/// Watches a configuration file and applies its `behavior.level` to a live
/// logger level.
pub struct LevelWatcher {
    path: PathBuf,
    level: AtomicLevel,
}

impl LevelWatcher {
    /// Create a watcher that updates `level` from the file at `path`.
    pub fn new(path: &Path, level: AtomicLevel) -> Self {
        Self {
            path: path.to_path_buf(),
            level,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let level = self.level.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        match apply_level_reload(&path, &level) {
                            Ok(true) => {
                                tracing::info!(level = %level.level(), "Log level reloaded")
                            }
                            Ok(false) => {}
                            Err(e) => tracing::error!(
                                "Failed to reload config: {}. Keeping current level.",
                                e
                            ),
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Level watcher started");
        Ok(watcher)
    }
}

/// Reload `path` and apply its level to `level`.
///
/// Returns `Ok(true)` when the level changed. A file without a level leaves
/// the current one untouched.
pub fn apply_level_reload(path: &Path, level: &AtomicLevel) -> Result<bool, ConfigError> {
    let config = load_config(path)?;
    let Some(new_level) = config.behavior.level else {
        return Ok(false);
    };

    let new_level = new_level.level();
    if new_level == level.level() {
        return Ok(false);
    }
    level.set_level(new_level);
    Ok(true)
}
