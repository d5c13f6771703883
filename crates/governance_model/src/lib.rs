//! Governance Model - identifiers, errors, and outcome records
//!
//! This crate holds the types shared by the access-control and tagging
//! engines: the opaque document/user identifiers, the closed error taxonomy,
//! and the `Applied`/`Rejected` transition types every engine returns.

mod error;
mod ids;
mod outcome;
pub mod text;

pub use error::*;
pub use ids::*;
pub use outcome::*;
