//! Access control for documents.
//!
//! Each document carries an access-control list granting one permission level
//! per user. Levels form a strict hierarchy (`view < download < edit < admin`)
//! and a higher level implies every lower one.
//!
//! # Modules
//!
//! - `level`: the permission hierarchy
//! - `acl`: the indexed, ordered entry collection
//! - `engine`: grant, toggle, revoke, and query operations
//!
//! # Example
//!
//! ```
//! use access_control::{assign_permission, has_permission, Acl, PermissionLevel};
//! use governance_model::{DocId, UserId};
//!
//! let doc = DocId::from("d1");
//! let user = UserId::from("u1");
//!
//! let acl = assign_permission(&doc, &user, "edit", Acl::new())
//!     .unwrap()
//!     .collection;
//!
//! assert!(has_permission(&doc, &user, PermissionLevel::Download, &acl));
//! assert!(!has_permission(&doc, &user, PermissionLevel::Admin, &acl));
//! ```

pub mod acl;
pub mod engine;
pub mod level;

pub use acl::{Acl, AclEntry};
pub use engine::{
    assign_level, assign_level_at, assign_permission, assign_permission_at, check_permission,
    get_permission, grant_counts, has_permission, list_users_with_access, lookup,
    remove_permission, revoke, revoke_at, Assignment, GrantCounts, PermissionCheck,
    PermissionLookup, Revocation, UserAccess, UsersWithAccess,
};
pub use level::PermissionLevel;
