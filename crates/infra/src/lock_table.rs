//! Per-account mutual exclusion.
//!
//! The registry maps account ids to lock cells, created lazily on first
//! touch. Get-or-insert goes through the concurrent map's entry API, so two
//! workers first touching the same unseen account can never mint two
//! distinct locks for it. The shard guard is released before blocking on
//! the account lock itself; only the insertion is a short critical section.
//!
//! Entries are evicted once the last holder releases and no waiter remains,
//! so the table's memory tracks accounts with in-flight operations rather
//! than every account ever seen.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex};

type LockCell = Arc<Mutex<()>>;
type OwnedGuard = ArcMutexGuard<RawMutex, ()>;

/// Registry of per-account locks.
#[derive(Debug, Default, Clone)]
pub struct LockTable {
    locks: Arc<DashMap<String, LockCell>>,
}

impl LockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the account's lock is held.
    pub fn acquire(&self, account_id: &str) -> AccountLockGuard {
        let cell = self.cell(account_id);
        let inner = cell.lock_arc();
        self.guard(account_id, inner)
    }

    /// Like [`LockTable::acquire`], but gives up after `timeout`.
    pub fn acquire_for(&self, account_id: &str, timeout: Duration) -> Option<AccountLockGuard> {
        let cell = self.cell(account_id);
        let inner = cell.try_lock_arc_for(timeout)?;
        Some(self.guard(account_id, inner))
    }

    /// Number of live entries (locks currently held or awaited).
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn cell(&self, account_id: &str) -> LockCell {
        // The entry guard drops at the end of this statement, before any
        // blocking on the account lock.
        self.locks
            .entry(account_id.to_owned())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn guard(&self, account_id: &str, inner: OwnedGuard) -> AccountLockGuard {
        AccountLockGuard {
            locks: Arc::clone(&self.locks),
            account_id: account_id.to_owned(),
            inner: Some(inner),
        }
    }
}

/// Scoped hold of one account's lock.
///
/// Releases on drop, covering every exit path of the critical section.
#[must_use = "the account lock is held only while the guard is alive"]
pub struct AccountLockGuard {
    locks: Arc<DashMap<String, LockCell>>,
    account_id: String,
    inner: Option<OwnedGuard>,
}

impl Drop for AccountLockGuard {
    fn drop(&mut self) {
        drop(self.inner.take());
        // The map holds the only remaining reference exactly when no holder
        // or waiter is left; `remove_if` serializes with get-or-insert on
        // the shard lock, so a concurrent first touch either sees the entry
        // (and keeps it alive) or inserts a fresh one after the removal.
        self.locks
            .remove_if(&self.account_id, |_, cell| Arc::strong_count(cell) == 1);
    }
}
