//! The connection registry: authoritative in-memory set of active sessions.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::record::{ConnectionRecord, ConnectionUpdate};

/// Inactivity threshold after which a record is stale, in minutes.
pub const STALE_AFTER_MINS: i64 = 60;

/// Sweep after an upsert whenever the table size is a multiple of this.
pub const SWEEP_EVERY: usize = 10;

/// Process-wide table of active connections, keyed by session ID.
///
/// All operations are synchronous, pure in-memory computation plus a clock
/// read, made atomic by a single mutex over the table. The lock is never held
/// across I/O; hold time is O(table size) only during an eviction sweep.
///
/// Eviction is lazy: stale records are removed at the start of every read
/// ([`get`](Self::get), [`list_active`](Self::list_active),
/// [`count`](Self::count)) and, so a write-heavy registry with no readers
/// does not grow without bound, after any upsert that leaves the table size
/// at a multiple of [`SWEEP_EVERY`]. There is no timer and no background
/// task.
///
/// Single-process only: multiple instances each see a disjoint view. That is
/// a documented deployment limitation, not something this type defends
/// against.
pub struct ConnectionRegistry {
    clock: Arc<dyn Clock>,
    table: Mutex<HashMap<String, ConnectionRecord>>,
}

impl ConnectionRegistry {
    /// Create an empty registry reading time from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            table: Mutex::new(HashMap::new()),
        }
    }

    /// Insert or update the record for `session_id`.
    ///
    /// `connected_at` is preserved from an existing record and set to now for
    /// a new one; `last_activity` is always set to now; every other field is
    /// replaced wholesale from `update`. Never fails.
    pub fn upsert(&self, session_id: impl Into<String>, update: ConnectionUpdate) {
        let session_id = session_id.into();
        let mut table = self.table.lock();
        // Read time under the lock: timestamps must be ordered like the
        // writes themselves, or a racing re-upsert could record a
        // `last_activity` older than the `connected_at` it preserves.
        let now = self.clock.now();

        let connected_at = table
            .get(&session_id)
            .map_or(now, |existing| existing.connected_at);

        let _ = table.insert(
            session_id.clone(),
            ConnectionRecord {
                session_id,
                identity: update.identity,
                ip: update.ip,
                network_info: update.network_info,
                user_agent: update.user_agent,
                connected_at,
                last_activity: now,
            },
        );

        if table.len() % SWEEP_EVERY == 0 {
            Self::sweep(&mut table, now);
        }
    }

    /// Look up the record for `session_id`, sweeping stale records first so a
    /// stale record is never returned.
    #[must_use]
    pub fn get(&self, session_id: &str) -> Option<ConnectionRecord> {
        let mut table = self.table.lock();
        let now = self.clock.now();
        Self::sweep(&mut table, now);
        table.get(session_id).cloned()
    }

    /// All non-stale records, in no particular order.
    #[must_use]
    pub fn list_active(&self) -> Vec<ConnectionRecord> {
        let mut table = self.table.lock();
        let now = self.clock.now();
        Self::sweep(&mut table, now);
        table.values().cloned().collect()
    }

    /// Number of non-stale records.
    #[must_use]
    pub fn count(&self) -> usize {
        let mut table = self.table.lock();
        let now = self.clock.now();
        Self::sweep(&mut table, now);
        table.len()
    }

    /// Delete the record for `session_id` if present. Absence is not an
    /// error.
    pub fn remove(&self, session_id: &str) {
        let mut table = self.table.lock();
        let _ = table.remove(session_id);
    }

    /// Delete every record regardless of staleness and return the count
    /// removed. Reserved for privileged callers.
    pub fn clear_all(&self) -> usize {
        let mut table = self.table.lock();
        let removed = table.len();
        table.clear();
        info!(removed, "cleared all tracked connections");
        removed
    }

    /// Remove records whose inactivity exceeds [`STALE_AFTER_MINS`].
    fn sweep(table: &mut HashMap<String, ConnectionRecord>, now: DateTime<Utc>) {
        let threshold = Duration::minutes(STALE_AFTER_MINS);
        let before = table.len();
        table.retain(|_, record| now - record.last_activity <= threshold);
        let removed = before - table.len();
        if removed > 0 {
            debug!(removed, remaining = table.len(), "evicted stale connections");
        }
    }

    /// Raw table size without sweeping, to observe physical deletion.
    #[cfg(test)]
    fn raw_len(&self) -> usize {
        self.table.lock().len()
    }
}
