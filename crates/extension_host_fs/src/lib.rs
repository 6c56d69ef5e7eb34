//! File-backed storage area persisting one JSON document per area.
//!
//! [`FileArea`] implements the `extension_host` storage-area contract over a single on-disk
//! JSON object, loading it once on open and writing it through on every mutation. A
//! configurable byte quota mirrors the host platform's local-area limits.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{
    cell::RefCell,
    fs, io,
    path::{Path, PathBuf},
    rc::Rc,
};

use extension_host::{entry_bytes, StorageArea, StorageAreaFuture, StorageEntries, StorageError};

/// Default byte quota for a file-backed area, matching the host local-area limit.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
/// Storage area persisted as one JSON object document on disk.
///
/// Every successful mutation persists the full document before returning; a failed persist
/// leaves the in-memory entries at their pre-write state.
pub struct FileArea {
    path: PathBuf,
    entries: Rc<RefCell<StorageEntries>>,
    quota_bytes: u64,
}

impl FileArea {
    /// Opens the area document at `path`, starting empty when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the file cannot be read and
    /// [`StorageError::Serialization`] when it does not hold a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries: StorageEntries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|err| {
                StorageError::serialization(format!("parse {}: {err}", path.display()))
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => StorageEntries::new(),
            Err(err) => {
                return Err(StorageError::unavailable(format!(
                    "read {}: {err}",
                    path.display()
                )))
            }
        };
        Ok(Self {
            path,
            entries: Rc::new(RefCell::new(entries)),
            quota_bytes: DEFAULT_QUOTA_BYTES,
        })
    }

    /// Replaces the byte quota applied to subsequent writes.
    pub fn with_quota(mut self, quota_bytes: u64) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    /// Returns the document path backing this area.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &StorageEntries) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|err| StorageError::serialization(err.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    StorageError::unavailable(format!("create {}: {err}", parent.display()))
                })?;
            }
        }
        fs::write(&self.path, raw).map_err(|err| {
            StorageError::unavailable(format!("write {}: {err}", self.path.display()))
        })
    }

    fn commit(&self, next: StorageEntries) -> Result<(), StorageError> {
        self.persist(&next)?;
        *self.entries.borrow_mut() = next;
        Ok(())
    }
}

impl StorageArea for FileArea {
    fn read<'a>(
        &'a self,
        keys: &'a [String],
    ) -> StorageAreaFuture<'a, Result<StorageEntries, StorageError>> {
        Box::pin(async move {
            let entries = self.entries.borrow();
            Ok(keys
                .iter()
                .filter_map(|key| entries.get(key).map(|value| (key.clone(), value.clone())))
                .collect())
        })
    }

    fn write<'a>(
        &'a self,
        new_entries: &'a StorageEntries,
    ) -> StorageAreaFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let mut next = self.entries.borrow().clone();
            for (key, value) in new_entries {
                next.insert(key.clone(), value.clone());
            }
            let footprint: u64 = next.iter().map(|(key, value)| entry_bytes(key, value)).sum();
            if footprint > self.quota_bytes {
                return Err(StorageError::quota_exceeded(format!(
                    "{footprint} bytes needed, quota {}",
                    self.quota_bytes
                )));
            }
            self.commit(next)
        })
    }

    fn remove<'a>(&'a self, keys: &'a [String]) -> StorageAreaFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let mut next = self.entries.borrow().clone();
            for key in keys {
                next.remove(key);
            }
            self.commit(next)
        })
    }

    fn clear<'a>(&'a self) -> StorageAreaFuture<'a, Result<(), StorageError>> {
        Box::pin(async move { self.commit(StorageEntries::new()) })
    }

    fn bytes_in_use<'a>(
        &'a self,
        keys: Option<&'a [String]>,
    ) -> StorageAreaFuture<'a, Result<u64, StorageError>> {
        Box::pin(async move {
            let entries = self.entries.borrow();
            let total = match keys {
                Some(keys) => keys
                    .iter()
                    .filter_map(|key| entries.get(key).map(|value| entry_bytes(key, value)))
                    .sum(),
                None => entries
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
    use std::path::PathBuf;

    use futures::executor::block_on;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn area_path(tmp: &TempDir) -> PathBuf {
        tmp.path().join("state").join("area.json")
    }

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn open_starts_empty_when_file_is_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let area = FileArea::open(area_path(&tmp)).expect("open");
        let area_obj: &dyn StorageArea = &area;

        assert!(block_on(area_obj.read(&keys(&["anything"]))).expect("read").is_empty());
        assert_eq!(block_on(area_obj.bytes_in_use(None)).expect("bytes"), 0);
    }

    #[test]
    fn entries_round_trip_across_reopen() {
        let tmp = TempDir::new().expect("tempdir");
        let path = area_path(&tmp);

        {
            let area = FileArea::open(&path).expect("open");
            let area_obj: &dyn StorageArea = &area;
            let entries = StorageEntries::from([
                ("ui.theme.v1".to_string(), json!("dark")),
                ("panel".to_string(), json!({ "collapsed": true, "width": 320 })),
            ]);
            block_on(area_obj.write(&entries)).expect("write");
        }

        let reopened = FileArea::open(&path).expect("reopen");
        let area_obj: &dyn StorageArea = &reopened;
        let read = block_on(area_obj.read(&keys(&["ui.theme.v1", "panel"]))).expect("read");
        assert_eq!(read.get("ui.theme.v1"), Some(&json!("dark")));
        assert_eq!(read.get("panel"), Some(&json!({ "collapsed": true, "width": 320 })));
    }

    #[test]
    fn remove_and_clear_persist_to_disk() {
        let tmp = TempDir::new().expect("tempdir");
        let path = area_path(&tmp);

        let area = FileArea::open(&path).expect("open");
        let area_obj: &dyn StorageArea = &area;
        let entries =
            StorageEntries::from([("a".to_string(), json!(1)), ("b".to_string(), json!(2))]);
        block_on(area_obj.write(&entries)).expect("write");

        block_on(area_obj.remove(&keys(&["a"]))).expect("remove");
        let reopened = FileArea::open(&path).expect("reopen");
        let read = block_on(reopened.read(&keys(&["a", "b"]))).expect("read");
        assert!(!read.contains_key("a"));
        assert_eq!(read.get("b"), Some(&json!(2)));

        block_on(area_obj.clear()).expect("clear");
        let reopened = FileArea::open(&path).expect("reopen");
        assert_eq!(block_on(reopened.bytes_in_use(None)).expect("bytes"), 0);
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_prior_entries() {
        let tmp = TempDir::new().expect("tempdir");
        let area = FileArea::open(area_path(&tmp)).expect("open").with_quota(32);
        let area_obj: &dyn StorageArea = &area;

        let small = StorageEntries::from([("k".to_string(), json!("ok"))]);
        block_on(area_obj.write(&small)).expect("write");

        let oversized = StorageEntries::from([("big".to_string(), json!("x".repeat(64)))]);
        let err = block_on(area_obj.write(&oversized)).expect_err("quota");
        assert!(err.is_quota_exceeded(), "unexpected error {err}");

        let read = block_on(area_obj.read(&keys(&["k", "big"]))).expect("read");
        assert_eq!(read.get("k"), Some(&json!("ok")));
        assert!(!read.contains_key("big"));
    }

    #[test]
    fn open_rejects_corrupt_documents() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("area.json");

        std::fs::write(&path, "{ not json").expect("seed");
        let err = FileArea::open(&path).expect_err("corrupt");
        assert!(matches!(err, StorageError::Serialization { .. }));

        std::fs::write(&path, "[1, 2, 3]").expect("seed");
        let err = FileArea::open(&path).expect_err("non-object");
        assert!(matches!(err, StorageError::Serialization { .. }));
    }

    #[test]
    fn open_reports_unreadable_paths_as_unavailable() {
        let tmp = TempDir::new().expect("tempdir");

        // The path is a directory, so reading it as a document fails.
        let err = FileArea::open(tmp.path()).expect_err("directory");
        assert!(matches!(err, StorageError::Unavailable { .. }));
    }

    #[test]
    fn failed_persist_leaves_entries_unchanged() {
        let tmp = TempDir::new().expect("tempdir");
        let area = FileArea::open(tmp.path().join("area.json")).expect("open");
        let area_obj: &dyn StorageArea = &area;

        let entries = StorageEntries::from([("k".to_string(), json!("v"))]);
        block_on(area_obj.write(&entries)).expect("write");

        // Turn the document path into a directory so the next persist fails.
        std::fs::remove_file(area.path()).expect("remove");
        std::fs::create_dir(area.path()).expect("blocker");

        let update = StorageEntries::from([("k".to_string(), json!("updated"))]);
        let err = block_on(area_obj.write(&update)).expect_err("persist");
        assert!(matches!(err, StorageError::Unavailable { .. }));

        let read = block_on(area_obj.read(&keys(&["k"]))).expect("read");
        assert_eq!(read.get("k"), Some(&json!("v")));
    }
}
