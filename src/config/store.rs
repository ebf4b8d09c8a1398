//! Settings stores
//!
//! The engine reads settings through [`SettingsStore`] and listens to its
//! `changed` notifier. Listeners may run on the watcher thread.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use super::Settings;
use crate::error::Result;
use crate::events::Notifier;
use crate::registry::{CommandConfigEntry, ConfigVersion};

/// Source of user settings
pub trait SettingsStore: Send + Sync {
    fn settings(&self) -> Settings;

    fn current_command_config(&self) -> Vec<CommandConfigEntry> {
        self.settings().commands
    }

    fn config_version(&self) -> ConfigVersion {
        self.settings().version
    }

    /// Fires after the settings changed
    fn changed(&self) -> &Notifier<()>;
}

/// In-memory settings, changed programmatically
#[derive(Default)]
pub struct MemorySettingsStore {
    settings: RwLock<Settings>,
    changed: Notifier<()>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
            changed: Notifier::new(),
        }
    }

    /// Replace the settings and notify listeners
    pub fn set(&self, settings: Settings) {
        if let Ok(mut current) = self.settings.write() {
            *current = settings;
        }
        self.changed.notify(&());
    }

    /// Modify the settings in place and notify listeners
    pub fn update<F: FnOnce(&mut Settings)>(&self, f: F) {
        if let Ok(mut current) = self.settings.write() {
            f(&mut current);
        }
        self.changed.notify(&());
    }
}

impl SettingsStore for MemorySettingsStore {
    fn settings(&self) -> Settings {
        self.settings
            .read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn changed(&self) -> &Notifier<()> {
        &self.changed
    }
}

struct FileStoreInner {
    path: PathBuf,
    settings: RwLock<Settings>,
    changed: Notifier<()>,
}

impl FileStoreInner {
    fn reload(&self) -> Result<()> {
        let settings = if self.path.exists() {
            Settings::load(&self.path)?
        } else {
            Settings::default()
        };
        if let Ok(mut current) = self.settings.write() {
            *current = settings;
        }
        tracing::debug!(path = %self.path.display(), "settings reloaded");
        self.changed.notify(&());
        Ok(())
    }
}

/// Settings backed by a JSON file
#[derive(Clone)]
pub struct FileSettingsStore {
    inner: Arc<FileStoreInner>,
}

impl FileSettingsStore {
    /// Open the store; a missing file means default settings
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let settings = if path.exists() {
            Settings::load(&path)?
        } else {
            Settings::default()
        };
        Ok(Self {
            inner: Arc::new(FileStoreInner {
                path,
                settings: RwLock::new(settings),
                changed: Notifier::new(),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Re-read the file and notify listeners
    pub fn reload(&self) -> Result<()> {
        self.inner.reload()
    }

    /// Write `settings` to the file and notify listeners
    pub fn save(&self, settings: Settings) -> Result<()> {
        settings.save(&self.inner.path)?;
        if let Ok(mut current) = self.inner.settings.write() {
            *current = settings;
        }
        self.inner.changed.notify(&());
        Ok(())
    }

    /// Reload whenever the file changes on disk. Watching stops when the
    /// returned watcher is dropped.
    pub fn watch(&self) -> Result<RecommendedWatcher> {
        let inner = self.inner.clone();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) => {
                    let relevant = matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    ) && event.paths.iter().any(|p| p.file_name() == inner.path.file_name());
                    if relevant {
                        if let Err(e) = inner.reload() {
                            tracing::warn!(path = %inner.path.display(), "failed to reload settings: {e}");
                        }
                    }
                }
                Err(e) => tracing::warn!("settings watcher error: {e}"),
            }
        })?;

        // Editors often replace the file, so watch its directory.
        let dir = self
            .inner
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        Ok(watcher)
    }
}

impl SettingsStore for FileSettingsStore {
    fn settings(&self) -> Settings {
        self.inner
            .settings
            .read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn changed(&self) -> &Notifier<()> {
        &self.inner.changed
    }
}
