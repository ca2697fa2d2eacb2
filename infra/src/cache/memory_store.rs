//! Single-process `EphemeralStore` for development and tests
//!
//! Expiry is evaluated on access against the tokio clock, so tests can drive
//! it with `tokio::time::pause` and `advance`. Writes also sweep every
//! expired entry, at most once per `SWEEP_INTERVAL`, so keys that are never
//! touched again do not accumulate.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use og_core::services::otp::EphemeralStore;

const SWEEP_INTERVAL: Duration = Duration::from_secs(1);

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    last_sweep: Option<Instant>,
}

impl Inner {
    /// Drop the entry behind `key` if it has expired
    fn purge(&mut self, key: &str, now: Instant) {
        if self.entries.get(key).map_or(false, |e| !e.is_live(now)) {
            self.entries.remove(key);
        }
    }

    fn sweep(&mut self, now: Instant) {
        let due = self
            .last_sweep
            .map_or(true, |last| now.duration_since(last) >= SWEEP_INTERVAL);
        if due {
            self.entries.retain(|_, e| e.is_live(now));
            self.last_sweep = Some(now);
        }
    }
}

/// In-memory key-value store with per-key expiry
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .map(|inner| inner.entries.values().filter(|e| e.is_live(now)).count())
            .unwrap_or(0)
    }

    /// Entries held in the map, expired or not
    pub(crate) fn stored_entries(&self) -> usize {
        self.lock().map(|inner| inner.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, String> {
        self.inner
            .lock()
            .map_err(|_| "Memory store lock poisoned".to_string())
    }
}

#[async_trait]
impl EphemeralStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let now = Instant::now();
        let mut inner = self.lock()?;
        inner.purge(key, now);
        Ok(inner.entries.get(key).map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        let now = Instant::now();
        let mut inner = self.lock()?;
        inner.sweep(now);
        inner.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + Duration::from_secs(ttl_seconds),
            },
        );
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<(), String> {
        let mut inner = self.lock()?;
        for key in keys {
            inner.entries.remove(key);
        }
        Ok(())
    }

    async fn increment_with_ttl(&self, key: &str, ttl_seconds: u64) -> Result<i64, String> {
        let now = Instant::now();
        let mut inner = self.lock()?;
        inner.purge(key, now);
        inner.sweep(now);

        let current = match inner.entries.get(key) {
            Some(entry) => entry
                .value
                .parse::<i64>()
                .map_err(|_| format!("Value at '{}' is not an integer", key))?,
            None => 0,
        };
        let next = current + 1;
        inner.entries.insert(
            key.to_string(),
            Entry {
                value: next.to_string(),
                expires_at: now + Duration::from_secs(ttl_seconds),
            },
        );
        Ok(next)
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>, String> {
        let now = Instant::now();
        let mut inner = self.lock()?;
        inner.purge(key, now);
        // round up so a live key never reports 0
        Ok(inner.entries.get(key).map(|e| {
            let remaining = e.expires_at - now;
            remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
        }))
    }

    async fn ping(&self) -> Result<(), String> {
        self.lock().map(|_| ())
    }
}
