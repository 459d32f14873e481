//! Hot-reloading of the shared resampler profile
//!
//! Sessions read the profile through a [`ProfileHandle`]. A reload resolves the
//! whole file first and swaps the profile in a single write, so readers see
//! either the old profile or the new one, never a mix.

use crate::error::{ConfigError, ConfigResult};
use crate::manager::ConfigManager;
use crate::profile::ResolvedProfile;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, SystemTime};

/// Shared, read-only access to the current profile
#[derive(Clone)]
pub struct ProfileHandle {
    inner: Arc<RwLock<Arc<ResolvedProfile>>>,
}

impl ProfileHandle {
    /// Wraps an initial profile
    pub fn new(profile: ResolvedProfile) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(profile))),
        }
    }

    /// Snapshot of the profile in force right now
    ///
    /// The snapshot stays valid after a reload; only new calls see the
    /// replacement.
    pub fn current(&self) -> ConfigResult<Arc<ResolvedProfile>> {
        let guard = self.inner.read().map_err(|_| ConfigError::LockPoisoned)?;
        Ok(Arc::clone(&guard))
    }

    fn replace(&self, profile: ResolvedProfile) -> ConfigResult<()> {
        let mut guard = self.inner.write().map_err(|_| ConfigError::LockPoisoned)?;
        *guard = Arc::new(profile);
        Ok(())
    }
}

/// Watches the config file and reloads the profile when it changes
pub struct ProfileWatcher {
    manager: ConfigManager,
    handle: ProfileHandle,
    last_modified: SystemTime,
    check_interval: Duration,
}

impl ProfileWatcher {
    /// Creates a watcher starting from an already resolved profile
    pub fn new(config_path: PathBuf, initial: ResolvedProfile) -> Self {
        let last_modified = std::fs::metadata(&config_path)
            .and_then(|m| m.modified())
            .unwrap_or_else(|_| SystemTime::now());

        Self {
            manager: ConfigManager::with_path(config_path),
            handle: ProfileHandle::new(initial),
            last_modified,
            check_interval: Duration::from_secs(2),
        }
    }

    /// Sets the check interval for file modifications
    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    /// Returns a handle to the current profile
    ///
    /// This can be cloned and shared across threads.
    pub fn profile_handle(&self) -> ProfileHandle {
        self.handle.clone()
    }

    /// Reloads the profile if the file has been modified
    ///
    /// Returns true if the profile was replaced. On error the previous
    /// profile stays in force.
    pub fn check_and_reload(&mut self) -> ConfigResult<bool> {
        let metadata =
            std::fs::metadata(self.manager.config_path()).map_err(ConfigError::IoError)?;
        let modified = metadata.modified().map_err(ConfigError::IoError)?;

        if modified <= self.last_modified {
            return Ok(false);
        }

        log::info!("Resampler config modified, reloading...");
        match self.manager.load() {
            Ok(profile) => {
                self.handle.replace(profile)?;
                self.last_modified = modified;
                log::info!("Resampler profile reloaded");
                Ok(true)
            }
            Err(e) => {
                log::warn!("Keeping previous resampler profile");
                // Don't update last_modified so a fixed file is picked up
                Err(e)
            }
        }
    }

    /// Starts watching for config changes in a background thread
    ///
    /// Returns a handle that can be used to stop watching.
    pub fn start_watching(mut self) -> WatchHandle {
        let (tx, rx) = std::sync::mpsc::channel();

        let handle = thread::spawn(move || {
            log::info!(
                "Resampler config watcher started for {}",
                self.manager.config_path().display()
            );

            loop {
                if rx.try_recv().is_ok() {
                    log::info!("Resampler config watcher stopped");
                    break;
                }

                if let Err(e) = self.check_and_reload() {
                    log::error!("Resampler config watcher error: {}", e);
                }

                thread::sleep(self.check_interval);
            }
        });

        WatchHandle {
            stop_tx: tx,
            thread_handle: Some(handle),
        }
    }
}

/// Handle for a running profile watcher
///
/// Dropping this handle will stop the watcher thread.
pub struct WatchHandle {
    stop_tx: std::sync::mpsc::Sender<()>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl WatchHandle {
    /// Stops the watcher and waits for the thread to finish
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
