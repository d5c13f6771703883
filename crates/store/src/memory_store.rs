//! In-memory library store.
//!
//! Intended for tests and for callers that persist elsewhere. Nothing survives
//! a restart.

use crate::error::{Result, StoreError};
use crate::record::Library;
use crate::storage::{expect_revision, LibraryStore, Revision, Stored};
use std::sync::RwLock;

/// In-memory implementation of [`LibraryStore`].
///
/// Loads take a read lock; saves take the write lock, so the revision check
/// and the write happen atomically.
#[derive(Debug, Default)]
pub struct MemoryLibraryStore {
    state: RwLock<Stored>,
}

impl MemoryLibraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing library at the initial revision.
    pub fn with_library(library: Library) -> Self {
        Self {
            state: RwLock::new(Stored {
                library: library.bind_acls(),
                revision: Revision::initial(),
            }),
        }
    }
}

impl LibraryStore for MemoryLibraryStore {
    fn load(&self) -> Result<Stored> {
        let state = self.state.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state.clone())
    }

    fn save(&self, library: &Library, expected: Revision) -> Result<Revision> {
        let mut state = self.state.write().map_err(|_| StoreError::Poisoned)?;
        expect_revision(expected, state.revision)?;

        state.library = library.clone();
        state.revision = state.revision.next();
        Ok(state.revision)
    }
}
