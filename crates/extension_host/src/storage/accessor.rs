//! Best-effort key/value accessor over a storage area.

use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::diagnostics::DiagnosticsSink;
use crate::messaging::{RuntimeBus, Signal};
use crate::storage::area::{StorageArea, StorageEntries};
use crate::storage::error::StorageError;

/// Operation tag attached to diagnostics reported for failed reads.
pub const READ_DIAGNOSTIC_CONTEXT: &str = "storage.get";

#[derive(Clone)]
/// Best-effort accessor over one storage area.
///
/// The policy surface ([`get`](Self::get), [`get_or`](Self::get_or), [`set`](Self::set))
/// never surfaces an error: failed reads are reported once to the diagnostics sink and resolve
/// to the caller's default, and failed writes resolve to `false` after one fire-and-forget
/// [`Signal::StorageExceeded`] broadcast. The strict surface ([`lookup`](Self::lookup),
/// [`store`](Self::store)) exposes the full [`StorageError`] taxonomy for callers that need to
/// distinguish outcomes.
pub struct KeyValueAccessor {
    area: Rc<dyn StorageArea>,
    bus: Rc<dyn RuntimeBus>,
    diagnostics: Rc<dyn DiagnosticsSink>,
}

impl KeyValueAccessor {
    /// Creates an accessor over the given host services.
    pub fn new(
        area: Rc<dyn StorageArea>,
        bus: Rc<dyn RuntimeBus>,
        diagnostics: Rc<dyn DiagnosticsSink>,
    ) -> Self {
        Self {
            area,
            bus,
            diagnostics,
        }
    }

    /// Reads one key, distinguishing presence, absence, and failure.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying area read fails; absence is `Ok(None)`.
    pub async fn lookup(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let keys = [key.to_string()];
        let mut entries = self.area.read(&keys).await?;
        Ok(entries.remove(key))
    }

    /// Writes one key as a single operation.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying area write fails. No rollback is attempted.
    pub async fn store(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let entries = StorageEntries::from([(key.to_string(), value)]);
        self.area.write(&entries).await
    }

    /// Reads one key, resolving both absence and failure to `None`.
    ///
    /// A failed read is reported exactly once to the diagnostics sink under
    /// [`READ_DIAGNOSTIC_CONTEXT`]; the caller never observes the error.
    pub async fn get(&self, key: &str) -> Option<Value> {
        match self.lookup(key).await {
            Ok(found) => found,
            Err(err) => {
                self.diagnostics
                    .report(&err.to_string(), READ_DIAGNOSTIC_CONTEXT);
                None
            }
        }
    }

    /// Reads one key, resolving both absence and failure to `default`.
    ///
    /// The default is returned as supplied; `false`, `0`, `""`, and `null` are honored like any
    /// other value.
    pub async fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).await.unwrap_or(default)
    }

    /// Writes one key, resolving failure to `false`.
    ///
    /// A failed write triggers exactly one fire-and-forget [`Signal::StorageExceeded`]
    /// broadcast; failures of the broadcast itself are discarded. No rollback is attempted.
    pub async fn set(&self, key: &str, value: Value) -> bool {
        match self.store(key, value).await {
            Ok(()) => true,
            Err(_) => {
                let _ = self.bus.broadcast(Signal::StorageExceeded).await;
                false
            }
        }
    }

    /// Writes one key, best-effort restoring the prior state when the write fails.
    ///
    /// The prior value is read before writing; on write failure it is written back, or the key
    /// removed when it was previously absent, before the failure resolves to `false`. When the
    /// prior state cannot be read there is nothing to restore and the write outcome stands.
    /// Racing writers to the same key are not coordinated.
    pub async fn set_with_restore(&self, key: &str, value: Value) -> bool {
        let prior = self.lookup(key).await.ok();
        if self.set(key, value).await {
            return true;
        }
        if let Some(prior) = prior {
            let keys = [key.to_string()];
            let _ = match prior {
                Some(prior) => self.store(key, prior).await,
                None => self.area.remove(&keys).await,
            };
        }
        false
    }

    /// Reads and deserializes one key, resolving absence, failure, and decode errors to `None`.
    ///
    /// A stored value that fails to decode counts as a failed read and is reported to the
    /// diagnostics sink.
    pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let found = self.get(key).await?;
        match serde_json::from_value(found) {
            Ok(value) => Some(value),
            Err(err) => {
                self.diagnostics
                    .report(&StorageError::from(err).to_string(), READ_DIAGNOSTIC_CONTEXT);
                None
            }
        }
    }

    /// Reads and deserializes one key, resolving absence, failure, and decode errors to
    /// `default`.
    pub async fn get_or_as<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get_as(key).await {
            Some(value) => value,
            None => default,
        }
    }

    /// Serializes and writes one key, resolving failure to `false`.
    ///
    /// A value that cannot be serialized counts as a failed write and triggers the same single
    /// broadcast as a rejected write.
    pub async fn set_as<T: Serialize>(&self, key: &str, value: &T) -> bool {
        match serde_json::to_value(value) {
            Ok(json) => self.set(key, json).await,
            Err(_) => {
                let _ = self.bus.broadcast(Signal::StorageExceeded).await;
                false
            }
        }
    }
}
