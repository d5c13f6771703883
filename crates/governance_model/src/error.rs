//! Error taxonomy shared by the access-control and tagging engines.
//!
//! Every variant is a rejected input. None of them is fatal; the engine that
//! produced one always hands the caller's collection back untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for operations that can only fail validation.
pub type GovernanceResult<T> = Result<T, GovernanceError>;

/// Errors produced by the governance engines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    /// The permission level is not one of the known levels.
    #[error("Invalid permission level \"{given}\". Must be one of: view, edit, download, admin")]
    InvalidPermissionLevel { given: String },

    /// A tag was empty after normalization.
    #[error("Empty tags are not allowed")]
    EmptyTag,

    #[error("Tag \"{tag}\" is too short (minimum {min} characters)")]
    TooShort { tag: String, min: usize },

    #[error("Tag \"{tag}\" is too long (maximum {max} characters)")]
    TooLong { tag: String, max: usize },

    /// The tag contains characters outside `[a-z0-9_-]`.
    #[error("Tag \"{tag}\" can only contain letters, numbers, hyphens, and underscores")]
    InvalidFormat { tag: String },

    /// The same tag appears twice in one batch (case-insensitively).
    #[error("Duplicate tag \"{tag}\"")]
    DuplicateInBatch { tag: String },

    /// Renaming would collide with another tag on the document.
    #[error("Tag \"{tag}\" already exists")]
    TagAlreadyExists { tag: String },
}

impl GovernanceError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            GovernanceError::InvalidPermissionLevel { .. } => ErrorCode::InvalidPermissionLevel,
            GovernanceError::EmptyTag => ErrorCode::EmptyTag,
            GovernanceError::TooShort { .. } => ErrorCode::TooShort,
            GovernanceError::TooLong { .. } => ErrorCode::TooLong,
            GovernanceError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            GovernanceError::DuplicateInBatch { .. } => ErrorCode::DuplicateInBatch,
            GovernanceError::TagAlreadyExists { .. } => ErrorCode::TagAlreadyExists,
        }
    }
}

/// Machine-readable error codes, serialized by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    InvalidPermissionLevel,
    EmptyTag,
    TooShort,
    TooLong,
    InvalidFormat,
    DuplicateInBatch,
    TagAlreadyExists,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidPermissionLevel => "InvalidPermissionLevel",
            ErrorCode::EmptyTag => "EmptyTag",
            ErrorCode::TooShort => "TooShort",
            ErrorCode::TooLong => "TooLong",
            ErrorCode::InvalidFormat => "InvalidFormat",
            ErrorCode::DuplicateInBatch => "DuplicateInBatch",
            ErrorCode::TagAlreadyExists => "TagAlreadyExists",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
