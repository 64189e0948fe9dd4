use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::ports::outbound::PlatformPort;

/// Deterministic platform: fixed clock, zero-length sleeps, scripted randomness
#[derive(Clone)]
pub struct MockPlatform {
    now: DateTime<Utc>,
    storage: Arc<Mutex<HashMap<String, String>>>,
    sleeps: Arc<Mutex<Vec<u64>>>,
    next_random: Arc<AtomicUsize>,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            now: Utc
                .with_ymd_and_hms(2025, 6, 15, 10, 30, 0)
                .single()
                .unwrap_or_default(),
            storage: Arc::new(Mutex::new(HashMap::new())),
            sleeps: Arc::new(Mutex::new(Vec::new())),
            next_random: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Durations passed to `sleep_ms`, in call order
    pub fn sleeps(&self) -> Vec<u64> {
        self.sleeps.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

impl PlatformPort for MockPlatform {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>> {
        self.sleeps
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(ms);
        Box::pin(async {})
    }

    /// Counts up from zero so generated codes are predictable
    fn random_index(&self, upper: usize) -> usize {
        self.next_random.fetch_add(1, Ordering::SeqCst) % upper.max(1)
    }

    fn storage_save(&self, key: &str, value: &str) {
        self.storage
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    fn storage_load(&self, key: &str) -> Option<String> {
        self.storage
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(key)
            .cloned()
    }

    fn storage_remove(&self, key: &str) {
        self.storage
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .remove(key);
    }
}
