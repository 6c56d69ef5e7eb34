//! Key/value storage-area contracts and adapters.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde_json::Value;

use crate::storage::error::StorageError;

/// Object-safe boxed future used by [`StorageArea`] async methods.
pub type StorageAreaFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Flat key/value entries exchanged with a storage area.
pub type StorageEntries = HashMap<String, Value>;

/// Host service for one persistent key/value storage area.
///
/// Keys are non-empty string identifiers; values are arbitrary JSON. Bulk reads and writes are
/// single operations against the host, and failure is always a returned [`StorageError`].
pub trait StorageArea {
    /// Reads the listed keys; absent keys are missing from the result.
    fn read<'a>(
        &'a self,
        keys: &'a [String],
    ) -> StorageAreaFuture<'a, Result<StorageEntries, StorageError>>;

    /// Writes all entries as one operation, overwriting existing keys.
    fn write<'a>(
        &'a self,
        entries: &'a StorageEntries,
    ) -> StorageAreaFuture<'a, Result<(), StorageError>>;

    /// Removes the listed keys; absent keys are ignored.
    fn remove<'a>(&'a self, keys: &'a [String]) -> StorageAreaFuture<'a, Result<(), StorageError>>;

    /// Removes every entry in the area.
    fn clear<'a>(&'a self) -> StorageAreaFuture<'a, Result<(), StorageError>>;

    /// Reports the footprint of the listed keys, or of the whole area when `keys` is `None`.
    fn bytes_in_use<'a>(
        &'a self,
        keys: Option<&'a [String]>,
    ) -> StorageAreaFuture<'a, Result<u64, StorageError>>;
}

/// Returns the quota footprint of one entry: key length plus serialized value length.
pub fn entry_bytes(key: &str, value: &Value) -> u64 {
    let value_len = serde_json::to_string(value).map(|raw| raw.len()).unwrap_or(0);
    (key.len() + value_len) as u64
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op storage area for unsupported targets and baseline tests.
pub struct NoopArea;

impl StorageArea for NoopArea {
    fn read<'a>(
        &'a self,
        _keys: &'a [String],
    ) -> StorageAreaFuture<'a, Result<StorageEntries, StorageError>> {
        Box::pin(async { Ok(StorageEntries::new()) })
    }

    fn write<'a>(
        &'a self,
        _entries: &'a StorageEntries,
    ) -> StorageAreaFuture<'a, Result<(), StorageError>> {
        Box::pin(async { Ok(()) })
    }

    fn remove<'a>(&'a self, _keys: &'a [String]) -> StorageAreaFuture<'a, Result<(), StorageError>> {
        Box::pin(async { Ok(()) })
    }

    fn clear<'a>(&'a self) -> StorageAreaFuture<'a, Result<(), StorageError>> {
        Box::pin(async { Ok(()) })
    }

    fn bytes_in_use<'a>(
        &'a self,
        _keys: Option<&'a [String]>,
    ) -> StorageAreaFuture<'a, Result<u64, StorageError>> {
        Box::pin(async { Ok(0) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory storage area with an optional byte quota.
pub struct MemoryArea {
    inner: Rc<RefCell<StorageEntries>>,
    quota_bytes: Option<u64>,
}

impl MemoryArea {
    /// Creates an unbounded in-memory area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory area that rejects writes growing past `quota_bytes`.
    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StorageEntries::new())),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Returns a snapshot of the stored entries.
    pub fn snapshot(&self) -> StorageEntries {
        self.inner.borrow().clone()
    }
}

impl StorageArea for MemoryArea {
    fn read<'a>(
        &'a self,
        keys: &'a [String],
    ) -> StorageAreaFuture<'a, Result<StorageEntries, StorageError>> {
        Box::pin(async move {
            let inner = self.inner.borrow();
            Ok(keys
                .iter()
                .filter_map(|key| inner.get(key).map(|value| (key.clone(), value.clone())))
                .collect())
        })
    }

    fn write<'a>(
        &'a self,
        entries: &'a StorageEntries,
    ) -> StorageAreaFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            if let Some(quota) = self.quota_bytes {
                let inner = self.inner.borrow();
                let untouched: u64 = inner
                    .iter()
                    .filter(|(key, _)| !entries.contains_key(*key))
                    .map(|(key, value)| entry_bytes(key, value))
                    .sum();
                let incoming: u64 = entries
                    .iter()
                    .map(|(key, value)| entry_bytes(key, value))
                    .sum();
                let projected = untouched.saturating_add(incoming);
                if projected > quota {
                    return Err(StorageError::quota_exceeded(format!(
                        "{projected} bytes needed, quota {quota}"
                    )));
                }
            }
            self.inner
                .borrow_mut()
                .extend(entries.iter().map(|(key, value)| (key.clone(), value.clone())));
            Ok(())
        })
    }

    fn remove<'a>(&'a self, keys: &'a [String]) -> StorageAreaFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            for key in keys {
                inner.remove(key);
            }
            Ok(())
        })
    }

    fn clear<'a>(&'a self) -> StorageAreaFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.inner.borrow_mut().clear();
            Ok(())
        })
    }

    fn bytes_in_use<'a>(
        &'a self,
        keys: Option<&'a [String]>,
    ) -> StorageAreaFuture<'a, Result<u64, StorageError>> {
        Box::pin(async move {
            let inner = self.inner.borrow();
            let total = match keys {
                Some(keys) => keys
                    .iter()
                    .filter_map(|key| inner.get(key).map(|value| entry_bytes(key, value)))
                    .sum(),
                None => inner
                    .iter()
                    .map(|(key, value)| entry_bytes(key, value))
                    .sum(),
            };
            Ok(total)
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn memory_area_round_trip_and_remove() {
        let area = MemoryArea::new();
        let area_obj: &dyn StorageArea = &area;

        let entries = StorageEntries::from([("ui.theme.v1".to_string(), json!("dark"))]);
        block_on(area_obj.write(&entries)).expect("write");

        let read = block_on(area_obj.read(&keys(&["ui.theme.v1", "missing"]))).expect("read");
        assert_eq!(read.len(), 1);
        assert_eq!(read.get("ui.theme.v1"), Some(&json!("dark")));

        block_on(area_obj.remove(&keys(&["ui.theme.v1"]))).expect("remove");
        let read = block_on(area_obj.read(&keys(&["ui.theme.v1"]))).expect("read");
        assert!(read.is_empty());
    }

    #[test]
    fn memory_area_clear_empties_the_area() {
        let area = MemoryArea::new();
        let area_obj: &dyn StorageArea = &area;

        let entries =
            StorageEntries::from([("a".to_string(), json!(1)), ("b".to_string(), json!(2))]);
        block_on(area_obj.write(&entries)).expect("write");
        block_on(area_obj.clear()).expect("clear");

        assert!(area.snapshot().is_empty());
        assert_eq!(block_on(area_obj.bytes_in_use(None)).expect("bytes"), 0);
    }

    #[test]
    fn memory_area_quota_rejects_oversized_write() {
        let area = MemoryArea::with_quota(24);
        let area_obj: &dyn StorageArea = &area;

        let small = StorageEntries::from([("k".to_string(), json!("ok"))]);
        block_on(area_obj.write(&small)).expect("write");

        let oversized = StorageEntries::from([("big".to_string(), json!("x".repeat(64)))]);
        let err = block_on(area_obj.write(&oversized)).expect_err("quota");
        assert!(err.is_quota_exceeded(), "unexpected error {err}");

        // A rejected write leaves existing entries untouched.
        let read = block_on(area_obj.read(&keys(&["k", "big"]))).expect("read");
        assert_eq!(read.get("k"), Some(&json!("ok")));
        assert!(!read.contains_key("big"));
    }

    #[test]
    fn memory_area_quota_allows_overwrite_in_place() {
        let area = MemoryArea::with_quota(16);
        let area_obj: &dyn StorageArea = &area;

        let first = StorageEntries::from([("slot".to_string(), json!("aaaaaa"))]);
        block_on(area_obj.write(&first)).expect("write");

        // Overwriting replaces the old footprint instead of adding to it.
        let second = StorageEntries::from([("slot".to_string(), json!("bbbbbb"))]);
        block_on(area_obj.write(&second)).expect("overwrite");
        assert_eq!(area.snapshot().get("slot"), Some(&json!("bbbbbb")));
    }

    #[test]
    fn memory_area_reports_bytes_in_use() {
        let area = MemoryArea::new();
        let area_obj: &dyn StorageArea = &area;

        let entries =
            StorageEntries::from([("ab".to_string(), json!("xy")), ("cd".to_string(), json!(7))]);
        block_on(area_obj.write(&entries)).expect("write");

        // "ab" + "\"xy\"" is 6 bytes, "cd" + "7" is 3 bytes.
        assert_eq!(block_on(area_obj.bytes_in_use(None)).expect("bytes"), 9);
        assert_eq!(
            block_on(area_obj.bytes_in_use(Some(&keys(&["ab"])))).expect("bytes"),
            6
        );
        assert_eq!(
            block_on(area_obj.bytes_in_use(Some(&keys(&["missing"])))).expect("bytes"),
            0
        );
    }

    #[test]
    fn noop_area_accepts_and_drops() {
        let area_obj: &dyn StorageArea = &NoopArea;

        let entries = StorageEntries::from([("k".to_string(), json!(true))]);
        block_on(area_obj.write(&entries)).expect("write");
        assert!(block_on(area_obj.read(&keys(&["k"]))).expect("read").is_empty());
        block_on(area_obj.remove(&keys(&["k"]))).expect("remove");
        block_on(area_obj.clear()).expect("clear");
        assert_eq!(block_on(area_obj.bytes_in_use(None)).expect("bytes"), 0);
    }

    #[test]
    fn entry_bytes_counts_key_and_serialized_value() {
        assert_eq!(entry_bytes("theme", &json!("dark")), 11);
        assert_eq!(entry_bytes("", &json!(null)), 4);
        assert_eq!(entry_bytes("n", &json!(42)), 3);
    }
}
