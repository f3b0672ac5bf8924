//! In-process OTP store
//!
//! Entries live in a mutex-guarded map keyed by identifier. The lock is never
//! held across an await point, so every operation is atomic with respect to
//! the others, which is what makes [`OtpStore::consume`] single-use.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use pv_core::domain::entities::OtpEntry;
use pv_core::services::otp::OtpStore;

/// OTP store held in process memory
pub struct InMemoryOtpStore {
    entries: Mutex<HashMap<String, OtpEntry>>,
    /// Cap on distinct identifiers, unbounded when `None`
    max_entries: Option<usize>,
}

impl InMemoryOtpStore {
    pub fn new(max_entries: Option<usize>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_entries,
        }
    }

    /// Store without a size cap
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> Result<usize, String> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, String> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, OtpEntry>>, String> {
        self.entries
            .lock()
            .map_err(|e| format!("OTP store lock poisoned: {}", e))
    }
}

impl Default for InMemoryOtpStore {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Make room for one more identifier
///
/// Only entries already expired at `now` are dropped. Live codes are never
/// evicted, so a store still full afterwards refuses the new identifier.
fn make_room(
    entries: &mut HashMap<String, OtpEntry>,
    max: usize,
    now: DateTime<Utc>,
) -> Result<(), String> {
    if entries.len() < max {
        return Ok(());
    }

    let before = entries.len();
    entries.retain(|_, entry| !entry.is_expired_at(now));
    tracing::debug!(removed = before - entries.len(), "Dropped expired entries to make room");

    if entries.len() >= max {
        tracing::warn!(capacity = max, event = "otp_store_full", "OTP store full, refusing new identifier");
        return Err(format!("OTP store is at capacity ({} pending codes)", max));
    }
    Ok(())
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn get(&self, identifier: &str) -> Result<Option<OtpEntry>, String> {
        Ok(self.lock()?.get(identifier).cloned())
    }

    async fn put(&self, entry: &OtpEntry) -> Result<(), String> {
        let mut entries = self.lock()?;

        if let Some(max) = self.max_entries {
            if !entries.contains_key(&entry.identifier) {
                make_room(&mut entries, max.max(1), entry.issued_at)?;
            }
        }

        entries.insert(entry.identifier.clone(), entry.clone());
        Ok(())
    }

    async fn delete(&self, identifier: &str) -> Result<bool, String> {
        Ok(self.lock()?.remove(identifier).is_some())
    }

    async fn consume(&self, identifier: &str, entry_id: Uuid) -> Result<bool, String> {
        let mut entries = self.lock()?;
        match entries.get(identifier) {
            Some(entry) if entry.id == entry_id => {
                entries.remove(identifier);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, String> {
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        Ok(before - entries.len())
    }
}
