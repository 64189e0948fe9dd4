//! PlatformPort - Unified platform services interface
//!
//! Abstracts the host so application code can be driven by a deterministic
//! mock in tests.

use std::{future::Future, pin::Pin};

use chrono::{DateTime, Utc};

/// Unified platform services port
///
/// Use via Dioxus context: `use_context::<Arc<dyn PlatformPort>>()`
pub trait PlatformPort: Send + Sync {
    // -------------------------------------------------------------------------
    // Time operations
    // -------------------------------------------------------------------------

    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;

    // -------------------------------------------------------------------------
    // Sleep operations
    // -------------------------------------------------------------------------

    /// Sleep for the given number of milliseconds
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>>;

    // -------------------------------------------------------------------------
    // Random operations
    // -------------------------------------------------------------------------

    /// Uniform index in `0..upper`
    fn random_index(&self, upper: usize) -> usize;

    // -------------------------------------------------------------------------
    // Storage operations
    // -------------------------------------------------------------------------

    /// Save a string value with the given key
    fn storage_save(&self, key: &str, value: &str);

    /// Load a string value by key, returns None if not found
    fn storage_load(&self, key: &str) -> Option<String>;

    /// Remove a value by key
    fn storage_remove(&self, key: &str);

    // -------------------------------------------------------------------------
    // User identity operations
    // -------------------------------------------------------------------------

    /// Get or create a stable anonymous user ID
    ///
    /// This ID is persisted in storage and reused across sessions until the
    /// storage file is removed. The landing screen creates sessions under it.
    fn get_user_id(&self) -> String {
        if let Some(id) = self.storage_load(storage_keys::USER_ID) {
            return id;
        }
        let id = format!("guest-{}", uuid::Uuid::new_v4().simple());
        self.storage_save(storage_keys::USER_ID, &id);
        id
    }
}

/// Storage key constants
pub mod storage_keys {
    pub const USER_ID: &str = "nanotour_user_id";
    pub const DISPLAY_NAME: &str = "nanotour_display_name";
    /// Session most recently created from the landing screen
    pub const HOSTED_SESSION: &str = "nanotour_hosted_session";
}
