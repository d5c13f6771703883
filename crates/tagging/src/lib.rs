//! Tag governance for document metadata.
//!
//! Tags are stored trimmed and lowercased, 2 to 30 characters drawn from
//! `[a-z0-9_-]`, and are unique per document ignoring case.
//!
//! # Example
//!
//! ```
//! use governance_model::DocId;
//! use tagging::{add_tags, edit_tag};
//!
//! let doc = DocId::from("d1");
//! let tags = add_tags(&doc, &["Finance", " q3-report "], Vec::new())
//!     .unwrap()
//!     .collection;
//! assert_eq!(tags, vec!["finance", "q3-report"]);
//!
//! let tags = edit_tag(&doc, "q3-report", "q4-report", tags).unwrap().collection;
//! assert_eq!(tags, vec!["finance", "q4-report"]);
//! ```

pub mod engine;
pub mod validate;

pub use engine::{
    add_tags, edit_tag, remove_tags, tags_match, TagRenamed, TagsAdded, TagsRemoved,
};
pub use validate::{normalize, validate, validate_tag, Validation, MAX_TAG_LEN, MIN_TAG_LEN};
