//! Desktop platform implementations
//!
//! Provides platform-specific implementations for desktop using
//! standard library and native crates.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use rand::Rng;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::{future::Future, pin::Pin, sync::Arc};

use crate::ports::outbound::PlatformPort;

/// Desktop storage provider with file-based persistence
///
/// Stores key-value pairs in a JSON file at:
/// - Linux: ~/.config/nanotour/player/storage.json
/// - macOS: ~/Library/Application Support/io.nanotour.player/storage.json
/// - Windows: C:\Users\<User>\AppData\Roaming\nanotour\player\storage.json
#[derive(Clone)]
pub struct DesktopStorageProvider {
    /// Path to the storage file
    storage_path: PathBuf,
    /// In-memory cache of stored values
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for DesktopStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopStorageProvider {
    /// Create a storage provider in the platform config directory
    pub fn new() -> Self {
        let storage_path = if let Some(dirs) = ProjectDirs::from("io", "nanotour", "player") {
            dirs.config_dir().join("storage.json")
        } else {
            // Fallback to current directory if project dirs unavailable
            PathBuf::from("nanotour_storage.json")
        };
        Self::at_path(storage_path)
    }

    /// Create a storage provider backed by `storage_path`
    ///
    /// Loads existing data from the file if it exists.
    pub fn at_path(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();
        let cache = load_cache(&storage_path);

        tracing::debug!("Desktop storage initialized at: {:?}", storage_path);

        Self {
            storage_path,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Persist the cache to disk
    fn persist(&self) {
        if let Some(parent) = self.storage_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::error!("Failed to create storage directory: {}", e);
                return;
            }
        }

        let cache = match self.cache.read() {
            Ok(guard) => guard,
            Err(e) => {
                tracing::error!("Failed to acquire read lock for storage: {}", e);
                return;
            }
        };

        match serde_json::to_string_pretty(&*cache) {
            Ok(data) => {
                if let Err(e) = fs::write(&self.storage_path, data) {
                    tracing::error!("Failed to write storage file: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Failed to serialize storage data: {}", e);
            }
        }
    }

    pub fn save(&self, key: &str, value: &str) {
        match self.cache.write() {
            Ok(mut guard) => {
                guard.insert(key.to_string(), value.to_string());
                drop(guard); // Release lock before I/O
                self.persist();
            }
            Err(e) => {
                tracing::error!("Failed to acquire write lock for storage: {}", e);
            }
        }
    }

    pub fn load(&self, key: &str) -> Option<String> {
        match self.cache.read() {
            Ok(guard) => guard.get(key).cloned(),
            Err(e) => {
                tracing::error!("Failed to acquire read lock for storage: {}", e);
                None
            }
        }
    }

    pub fn remove(&self, key: &str) {
        match self.cache.write() {
            Ok(mut guard) => {
                guard.remove(key);
                drop(guard); // Release lock before I/O
                self.persist();
            }
            Err(e) => {
                tracing::error!("Failed to acquire write lock for storage: {}", e);
            }
        }
    }
}

fn load_cache(storage_path: &Path) -> HashMap<String, String> {
    if !storage_path.exists() {
        return HashMap::new();
    }
    match fs::read_to_string(storage_path) {
        Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Failed to parse storage file: {}", e);
                HashMap::new()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read storage file: {}", e);
            HashMap::new()
        }
    }
}

/// Desktop platform services: system clock, tokio timers, `rand`, file storage
#[derive(Clone, Default)]
pub struct DesktopPlatform {
    storage: DesktopStorageProvider,
}

impl DesktopPlatform {
    pub fn new(storage: DesktopStorageProvider) -> Self {
        Self { storage }
    }
}

impl PlatformPort for DesktopPlatform {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>> {
        Box::pin(async move {
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        })
    }

    fn random_index(&self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..upper)
    }

    fn storage_save(&self, key: &str, value: &str) {
        self.storage.save(key, value);
    }

    fn storage_load(&self, key: &str) -> Option<String> {
        self.storage.load(key)
    }

    fn storage_remove(&self, key: &str) {
        self.storage.remove(key);
    }
}

/// Create platform services for desktop
pub fn create_platform() -> DesktopPlatform {
    DesktopPlatform::new(DesktopStorageProvider::new())
}
