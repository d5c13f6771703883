//! Library storage abstraction.
//!
//! A store persists one [`Library`] and a [`Revision`] counter. Saves are
//! compare-and-swap: the caller passes the revision it loaded and the save
//! fails with [`StoreError::Conflict`] if anyone saved in between.

use crate::error::{Result, StoreError};
use crate::record::Library;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of successful saves since the library was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Revision(pub u64);

impl Revision {
    pub fn initial() -> Self {
        Self(0)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A loaded library together with the revision it was read at.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stored {
    pub library: Library,
    pub revision: Revision,
}

/// Trait for library persistence backends.
///
/// Implementations must be thread-safe; the coordinator may be shared.
pub trait LibraryStore: Send + Sync {
    /// Load the current library. An empty store yields an empty library at
    /// [`Revision::initial`].
    fn load(&self) -> Result<Stored>;

    /// Persist `library` if the stored revision is still `expected`.
    ///
    /// Returns the new revision.
    fn save(&self, library: &Library, expected: Revision) -> Result<Revision>;
}

/// Check a compare-and-swap precondition.
pub(crate) fn expect_revision(expected: Revision, found: Revision) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(StoreError::Conflict { expected, found })
    }
}
