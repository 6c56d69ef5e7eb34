//! Failure-injecting storage-area wrapper for exercising error paths.

use std::cell::Cell;

use crate::storage::area::{StorageArea, StorageAreaFuture, StorageEntries};
use crate::storage::error::StorageError;

/// Controls which operations a [`FailingArea`] rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Pass every operation through to the wrapped area.
    Never,
    /// Reject every read with [`StorageError::Unavailable`].
    AllReads,
    /// Reject every write with [`StorageError::QuotaExceeded`].
    AllWrites,
    /// Reject the next `n` writes, then pass writes through.
    NextWrites(usize),
}

#[derive(Debug, Clone)]
/// Storage-area wrapper that injects failures according to a [`FailurePolicy`].
///
/// Reads and writes consult the policy; `remove`, `clear`, and `bytes_in_use` always pass
/// through to the wrapped area.
pub struct FailingArea<A> {
    inner: A,
    policy: FailurePolicy,
    rejected_writes: Cell<usize>,
}

impl<A: StorageArea> FailingArea<A> {
    /// Wraps `inner` with the given failure policy.
    pub fn new(inner: A, policy: FailurePolicy) -> Self {
        Self {
            inner,
            policy,
            rejected_writes: Cell::new(0),
        }
    }

    fn read_failure(&self) -> Option<StorageError> {
        matches!(self.policy, FailurePolicy::AllReads)
            .then(|| StorageError::unavailable("simulated read failure"))
    }

    fn write_failure(&self) -> Option<StorageError> {
        match self.policy {
            FailurePolicy::Never | FailurePolicy::AllReads => None,
            FailurePolicy::AllWrites => {
                Some(StorageError::quota_exceeded("simulated write failure"))
            }
            FailurePolicy::NextWrites(n) => {
                if self.rejected_writes.get() < n {
                    self.rejected_writes.set(self.rejected_writes.get() + 1);
                    Some(StorageError::quota_exceeded("simulated write failure"))
                } else {
                    None
                }
            }
        }
    }
}

impl<A: StorageArea> StorageArea for FailingArea<A> {
    fn read<'a>(
        &'a self,
        keys: &'a [String],
    ) -> StorageAreaFuture<'a, Result<StorageEntries, StorageError>> {
        Box::pin(async move {
            if let Some(err) = self.read_failure() {
                return Err(err);
            }
            self.inner.read(keys).await
        })
    }

    fn write<'a>(
        &'a self,
        entries: &'a StorageEntries,
    ) -> StorageAreaFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            if let Some(err) = self.write_failure() {
                return Err(err);
            }
            self.inner.write(entries).await
        })
    }

    fn remove<'a>(&'a self, keys: &'a [String]) -> StorageAreaFuture<'a, Result<(), StorageError>> {
        self.inner.remove(keys)
    }

    fn clear<'a>(&'a self) -> StorageAreaFuture<'a, Result<(), StorageError>> {
        self.inner.clear()
    }

    fn bytes_in_use<'a>(
        &'a self,
        keys: Option<&'a [String]>,
    ) -> StorageAreaFuture<'a, Result<u64, StorageError>> {
        self.inner.bytes_in_use(keys)
    }
}
