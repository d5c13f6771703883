//! Store - Persistence and coordination for document governance
//!
//! This crate persists the document library (records with their ACLs and
//! tags, plus folders), loads governance settings, and provides the
//! [`Governor`] that authorizes callers and applies the access-control and
//! tagging engines to stored documents.

mod error;
mod file_store;
mod governor;
mod memory_store;
mod record;
mod settings;
mod storage;

pub use error::*;
pub use file_store::*;
pub use governor::*;
pub use memory_store::*;
pub use record::*;
pub use settings::*;
pub use storage::*;
