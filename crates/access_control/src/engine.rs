//! Grant, revoke, and query operations over an explicit ACL.
//!
//! Every function takes the current ACL and returns the new one; nothing here
//! keeps state between calls or knows who the caller is. Administrative
//! overrides belong to the caller and must be applied before asking
//! [`has_permission`].

use crate::acl::{Acl, AclEntry};
use crate::level::PermissionLevel;
use chrono::{DateTime, Utc};
use governance_model::{Applied, DocId, Rejected, Transition, UserId};
use serde::Serialize;

/// What an assignment did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub document_id: DocId,
    pub user_id: UserId,
    pub permission_level: PermissionLevel,
    /// True when the exact grant already existed and was toggled off
    pub removed: bool,
    /// Timestamp of the new entry; absent when toggled off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<DateTime<Utc>>,
    /// Level the user held on the document before this call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<PermissionLevel>,
    pub updated_at: DateTime<Utc>,
}

/// What a revocation did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Revocation {
    pub document_id: DocId,
    pub user_id: UserId,
    /// Level that was removed, if the user had one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked: Option<PermissionLevel>,
    pub removed_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionLookup {
    pub document_id: DocId,
    pub user_id: UserId,
    pub permission_level: Option<PermissionLevel>,
    pub has_access: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCheck {
    pub has_permission: bool,
    pub current_permission: Option<PermissionLevel>,
}

/// One row of [`list_users_with_access`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccess {
    pub user_id: UserId,
    pub permission_level: PermissionLevel,
    pub assigned_at: DateTime<Utc>,
}

/// Assign a permission level given by name.
///
/// Unknown level names are rejected with `InvalidPermissionLevel` and the ACL
/// is returned untouched. See [`assign_level`] for the toggle rules.
pub fn assign_permission(
    document_id: &DocId,
    user_id: &UserId,
    level: &str,
    acl: Acl,
) -> Transition<Acl, Assignment> {
    assign_permission_at(document_id, user_id, level, acl, Utc::now())
}

pub fn assign_permission_at(
    document_id: &DocId,
    user_id: &UserId,
    level: &str,
    acl: Acl,
    now: DateTime<Utc>,
) -> Transition<Acl, Assignment> {
    match level.parse::<PermissionLevel>() {
        Ok(level) => Ok(assign_level_at(document_id, user_id, level, acl, now)),
        Err(error) => Err(Rejected::new(error, acl)),
    }
}

/// Assign `level` to a user on a document.
///
/// If the user already holds exactly `level`, the grant is removed instead
/// (`removed = true`). Otherwise any entry the user holds on the document is
/// replaced by a fresh one appended to the ACL.
pub fn assign_level(
    document_id: &DocId,
    user_id: &UserId,
    level: PermissionLevel,
    acl: Acl,
) -> Applied<Acl, Assignment> {
    assign_level_at(document_id, user_id, level, acl, Utc::now())
}

pub fn assign_level_at(
    document_id: &DocId,
    user_id: &UserId,
    level: PermissionLevel,
    mut acl: Acl,
    now: DateTime<Utc>,
) -> Applied<Acl, Assignment> {
    if acl.contains_exact(document_id, user_id, level) {
        acl.remove(document_id, user_id);
        let outcome = Assignment {
            document_id: document_id.clone(),
            user_id: user_id.clone(),
            permission_level: level,
            removed: true,
            assigned_at: None,
            previous: Some(level),
            updated_at: now,
        };
        return Applied::new(acl, outcome);
    }

    let previous = acl
        .insert(AclEntry::new(
            document_id.clone(),
            user_id.clone(),
            level,
            now,
        ))
        .map(|entry| entry.permission_level);

    let outcome = Assignment {
        document_id: document_id.clone(),
        user_id: user_id.clone(),
        permission_level: level,
        removed: false,
        assigned_at: Some(now),
        previous,
        updated_at: now,
    };
    Applied::new(acl, outcome)
}

/// Remove whatever the user holds on the document. Absent entries are a no-op.
pub fn remove_permission(document_id: &DocId, user_id: &UserId, acl: Acl) -> Acl {
    revoke(document_id, user_id, acl).collection
}

/// [`remove_permission`] that also reports what was removed.
pub fn revoke(document_id: &DocId, user_id: &UserId, acl: Acl) -> Applied<Acl, Revocation> {
    revoke_at(document_id, user_id, acl, Utc::now())
}

pub fn revoke_at(
    document_id: &DocId,
    user_id: &UserId,
    mut acl: Acl,
    now: DateTime<Utc>,
) -> Applied<Acl, Revocation> {
    let revoked = acl
        .remove(document_id, user_id)
        .map(|entry| entry.permission_level);
    let outcome = Revocation {
        document_id: document_id.clone(),
        user_id: user_id.clone(),
        revoked,
        removed_at: now,
    };
    Applied::new(acl, outcome)
}

/// The level a user holds on a document; `None` means no access.
pub fn get_permission(document_id: &DocId, user_id: &UserId, acl: &Acl) -> Option<PermissionLevel> {
    acl.get(document_id, user_id)
        .map(|entry| entry.permission_level)
}

pub fn lookup(document_id: &DocId, user_id: &UserId, acl: &Acl) -> PermissionLookup {
    let permission_level = get_permission(document_id, user_id, acl);
    PermissionLookup {
        document_id: document_id.clone(),
        user_id: user_id.clone(),
        permission_level,
        has_access: permission_level.is_some(),
    }
}

/// Check whether the user's level on the document is at or above `required`.
pub fn has_permission(
    document_id: &DocId,
    user_id: &UserId,
    required: PermissionLevel,
    acl: &Acl,
) -> bool {
    check_permission(document_id, user_id, required, acl).has_permission
}

pub fn check_permission(
    document_id: &DocId,
    user_id: &UserId,
    required: PermissionLevel,
    acl: &Acl,
) -> PermissionCheck {
    let current_permission = get_permission(document_id, user_id, acl);
    PermissionCheck {
        has_permission: current_permission.is_some_and(|level| level.satisfies(required)),
        current_permission,
    }
}

/// Number of grants on one document at each level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantCounts {
    pub view: usize,
    pub download: usize,
    pub edit: usize,
    pub admin: usize,
}

impl GrantCounts {
    pub fn get(&self, level: PermissionLevel) -> usize {
        match level {
            PermissionLevel::View => self.view,
            PermissionLevel::Download => self.download,
            PermissionLevel::Edit => self.edit,
            PermissionLevel::Admin => self.admin,
        }
    }

    pub fn total(&self) -> usize {
        self.view + self.download + self.edit + self.admin
    }
}

/// Count the grants on a document per level.
pub fn grant_counts(document_id: &DocId, acl: &Acl) -> GrantCounts {
    let mut counts = GrantCounts::default();
    for entry in acl.entries_for(document_id) {
        let slot = match entry.permission_level {
            PermissionLevel::View => &mut counts.view,
            PermissionLevel::Download => &mut counts.download,
            PermissionLevel::Edit => &mut counts.edit,
            PermissionLevel::Admin => &mut counts.admin,
        };
        *slot += 1;
    }
    counts
}

/// Everyone with access to a document, in ACL order.
///
/// The returned iterator is `Clone`, so callers can walk it more than once.
pub fn list_users_with_access<'a>(document_id: &'a DocId, acl: &'a Acl) -> UsersWithAccess<'a> {
    UsersWithAccess {
        document_id,
        entries: acl.iter(),
    }
}

/// Iterator returned by [`list_users_with_access`].
#[derive(Clone, Debug)]
pub struct UsersWithAccess<'a> {
    document_id: &'a DocId,
    entries: std::slice::Iter<'a, AclEntry>,
}

impl Iterator for UsersWithAccess<'_> {
    type Item = UserAccess;

    fn next(&mut self) -> Option<Self::Item> {
        let document_id = self.document_id;
        self.entries
            .by_ref()
            .find(|entry| &entry.document_id == document_id)
            .map(|entry| UserAccess {
                user_id: entry.user_id.clone(),
                permission_level: entry.permission_level,
                assigned_at: entry.assigned_at,
            })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.entries.size_hint().1)
    }
}
