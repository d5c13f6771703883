//! Error types for storage and coordination

use crate::storage::Revision;
use access_control::PermissionLevel;
use governance_model::{DocId, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Someone saved the library after it was loaded.
    #[error("Concurrent modification: expected revision {expected}, found {found}")]
    Conflict { expected: Revision, found: Revision },

    #[error("Storage lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors from the coordinator. Rejected input is not an error here; it comes
/// back as an unsuccessful report.
#[derive(Debug, Error)]
pub enum GovernError {
    #[error("Permission denied: {user} needs {required} on {document}")]
    Denied {
        user: UserId,
        document: DocId,
        required: PermissionLevel,
    },

    #[error("Document not found: {0}")]
    DocumentNotFound(DocId),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

pub type GovernResult<T> = std::result::Result<T, GovernError>;
