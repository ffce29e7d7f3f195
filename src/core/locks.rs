use crate::domain::model::AccountId;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<AccountId, Arc<Mutex<()>>>;

/// One async mutex per account id. Use cases that share a registry never
/// interleave their read-modify-write cycles on the same account.
///
/// An entry lives only while someone holds or waits for it.
#[derive(Debug, Clone, Default)]
pub struct AccountLocks {
    locks: Arc<LockMap>,
}

/// Held lock on one account. Releasing it drops the registry entry when no
/// other task is holding or waiting for the same id.
#[derive(Debug)]
pub struct AccountGuard {
    id: AccountId,
    locks: Arc<LockMap>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for AccountGuard {
    fn drop(&mut self) {
        self.guard.take();
        self.locks
            .remove_if(&self.id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, id: &AccountId) -> Arc<Mutex<()>> {
        let entry = self
            .locks
            .entry(*id)
            .or_insert_with(|| Arc::new(Mutex::new(())));
        Arc::clone(entry.value())
    }

    pub async fn acquire(&self, id: &AccountId) -> AccountGuard {
        let guard = self.lock_for(id).lock_owned().await;
        AccountGuard {
            id: *id,
            locks: Arc::clone(&self.locks),
            guard: Some(guard),
        }
    }

    /// Locks every distinct id in ascending order, so two callers asking for
    /// the same set can't deadlock each other.
    pub async fn acquire_all(&self, ids: &[AccountId]) -> Vec<AccountGuard> {
        let mut ordered = ids.to_vec();
        ordered.sort();
        ordered.dedup();

        let mut guards = Vec::with_capacity(ordered.len());
        for id in &ordered {
            guards.push(self.acquire(id).await);
        }
        guards
    }

    /// Number of ids currently held or waited on.
    pub fn tracked(&self) -> usize {
        self.locks.len()
    }
}
