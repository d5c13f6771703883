//! File-based library store.
//!
//! # Directory Structure
//!
//! ```text
//! data/
//! └── library.json    # { "revision": n, "documents": [...], "folders": [...] }
//! ```
//!
//! A missing or blank file reads as an empty library at the initial revision.
//! The whole snapshot is written to a temporary sibling and renamed into
//! place, so a reader sees either the previous save or the new one and a
//! failed save leaves the previous one intact.

use crate::error::{Result, StoreError};
use crate::record::{DocumentRecord, Folder, Library};
use crate::storage::{expect_revision, LibraryStore, Revision, Stored};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

const LIBRARY_FILE: &str = "library.json";
const LIBRARY_TMP_FILE: &str = "library.json.tmp";

/// On-disk form of a library, as read.
#[derive(Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    revision: Revision,
    #[serde(default)]
    documents: Vec<DocumentRecord>,
    #[serde(default)]
    folders: Vec<Folder>,
}

/// On-disk form of a library, as written.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    revision: Revision,
    documents: &'a [DocumentRecord],
    folders: &'a [Folder],
}

/// File-based implementation of [`LibraryStore`].
///
/// Within one process, loads share the lock and saves hold it exclusively.
/// Separate processes sharing a directory are not coordinated.
#[derive(Debug)]
pub struct FileLibraryStore {
    base_path: PathBuf,
    lock: RwLock<()>,
}

impl FileLibraryStore {
    /// Open a store rooted at `base_path`, creating the directory if needed.
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self {
            base_path,
            lock: RwLock::new(()),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of the snapshot file.
    pub fn library_path(&self) -> PathBuf {
        self.base_path.join(LIBRARY_FILE)
    }

    fn read_snapshot(&self) -> Result<Snapshot> {
        let path = self.library_path();
        if !path.exists() {
            return Ok(Snapshot::default());
        }
        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Snapshot::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_snapshot(&self, snapshot: &SnapshotRef<'_>) -> Result<()> {
        let tmp = self.base_path.join(LIBRARY_TMP_FILE);
        let content = serde_json::to_string_pretty(snapshot)?;
        if let Err(e) = fs::write(&tmp, content) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        fs::rename(&tmp, self.library_path())?;
        Ok(())
    }
}

impl LibraryStore for FileLibraryStore {
    fn load(&self) -> Result<Stored> {
        let _guard = self.lock.read().map_err(|_| StoreError::Poisoned)?;
        let snapshot = self.read_snapshot()?;

        Ok(Stored {
            library: Library {
                documents: snapshot.documents,
                folders: snapshot.folders,
            }
            .bind_acls(),
            revision: snapshot.revision,
        })
    }

    fn save(&self, library: &Library, expected: Revision) -> Result<Revision> {
        let _guard = self.lock.write().map_err(|_| StoreError::Poisoned)?;
        expect_revision(expected, self.read_snapshot()?.revision)?;

        let revision = expected.next();
        self.write_snapshot(&SnapshotRef {
            revision,
            documents: &library.documents,
            folders: &library.folders,
        })?;
        Ok(revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    #[test]
    fn test_new_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileLibraryStore::new(dir.path().join("data")).unwrap();
        let stored = store.load().unwrap();
        assert_eq!(stored, Stored::default());
        assert!(store.base_path().exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let store = FileLibraryStore::new(dir.path()).unwrap();

        let mut library = Library::new();
        library.documents.push(
            DocumentRecord::new("file_1".into(), &"alice".into()).with_field("title", "Plan"),
        );
        let revision = store.save(&library, Revision::initial()).unwrap();
        assert_eq!(revision, Revision(1));

        let reopened = FileLibraryStore::new(dir.path()).unwrap();
        let stored = reopened.load().unwrap();
        assert_eq!(stored.revision, Revision(1));
        assert_eq!(stored.library, library);
        assert!(!dir.path().join(LIBRARY_TMP_FILE).exists());
    }

    #[test]
    fn test_snapshot_layout() {
        let dir = TempDir::new().unwrap();
        let store = FileLibraryStore::new(dir.path()).unwrap();
        store.save(&Library::new(), Revision::initial()).unwrap();

        let raw: Value =
            serde_json::from_str(&fs::read_to_string(store.library_path()).unwrap()).unwrap();
        assert_eq!(raw, json!({ "revision": 1, "documents": [], "folders": [] }));
    }

    #[test]
    fn test_stale_revision_conflicts() {
        let dir = TempDir::new().unwrap();
        let store = FileLibraryStore::new(dir.path()).unwrap();
        store.save(&Library::new(), Revision::initial()).unwrap();

        let err = store.save(&Library::new(), Revision::initial()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Conflict {
                expected: Revision(0),
                found: Revision(1)
            }
        ));
    }

    #[test]
    fn test_failed_save_keeps_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = FileLibraryStore::new(dir.path()).unwrap();

        let mut library = Library::new();
        library
            .documents
            .push(DocumentRecord::new("d1".into(), &"alice".into()));
        store.save(&library, Revision::initial()).unwrap();

        // a directory where the temporary file should go makes the write fail
        fs::create_dir(dir.path().join(LIBRARY_TMP_FILE)).unwrap();
        let mut changed = library.clone();
        changed.documents[0].tags.push("lost".to_string());
        assert!(matches!(
            store.save(&changed, Revision(1)),
            Err(StoreError::Io(_))
        ));

        let stored = store.load().unwrap();
        assert_eq!(stored.revision, Revision(1));
        assert_eq!(stored.library, library);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(LIBRARY_FILE), "{ not json").unwrap();
        let store = FileLibraryStore::new(dir.path()).unwrap();
        assert!(matches!(store.load(), Err(StoreError::Serialization(_))));
    }
}
