//! Access-control list storage.
//!
//! An [`Acl`] keeps its entries in insertion order (the order callers see when
//! listing) and indexes them by document and user, so lookups do not scan.

use crate::level::PermissionLevel;
use chrono::{DateTime, Utc};
use governance_model::{DocId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single grant of one permission level to one user on one document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AclEntry {
    /// Document this grant applies to. Older records may omit it.
    #[serde(default)]
    pub document_id: DocId,
    pub user_id: UserId,
    pub permission_level: PermissionLevel,
    /// When the grant was created
    pub assigned_at: DateTime<Utc>,
    /// When the grant was last replaced
    pub last_modified: DateTime<Utc>,
}

impl AclEntry {
    /// Create an entry stamped with `now` for both timestamps.
    pub fn new(
        document_id: DocId,
        user_id: UserId,
        permission_level: PermissionLevel,
        now: DateTime<Utc>,
    ) -> Self {
        AclEntry {
            document_id,
            user_id,
            permission_level,
            assigned_at: now,
            last_modified: now,
        }
    }

    /// Check if this entry belongs to the given document and user.
    pub fn is_for(&self, document_id: &DocId, user_id: &UserId) -> bool {
        &self.document_id == document_id && &self.user_id == user_id
    }
}

/// Ordered set of [`AclEntry`] with at most one entry per (document, user).
///
/// Serializes as a plain array of entries. Deserializing an array that holds
/// several entries for the same pair keeps the first one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<AclEntry>", into = "Vec<AclEntry>")]
pub struct Acl {
    entries: Vec<AclEntry>,
    /// document -> user -> position in `entries`
    index: HashMap<DocId, HashMap<UserId, usize>>,
}

impl Acl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an ACL from entries, dropping later duplicates of a pair.
    pub fn from_entries(entries: impl IntoIterator<Item = AclEntry>) -> Self {
        let mut acl = Acl::new();
        for entry in entries {
            if acl.get(&entry.document_id, &entry.user_id).is_none() {
                acl.push(entry);
            }
        }
        acl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, AclEntry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<AclEntry> {
        self.entries
    }

    /// The entry for a document and user, if any.
    pub fn get(&self, document_id: &DocId, user_id: &UserId) -> Option<&AclEntry> {
        let pos = *self.index.get(document_id)?.get(user_id)?;
        self.entries.get(pos)
    }

    /// Check for an entry with exactly this document, user, and level.
    pub fn contains_exact(
        &self,
        document_id: &DocId,
        user_id: &UserId,
        level: PermissionLevel,
    ) -> bool {
        self.get(document_id, user_id)
            .is_some_and(|entry| entry.permission_level == level)
    }

    /// Replace any entry for the entry's pair and append the new one.
    /// Returns the entry that was replaced.
    pub fn insert(&mut self, entry: AclEntry) -> Option<AclEntry> {
        let previous = self.remove(&entry.document_id, &entry.user_id);
        self.push(entry);
        previous
    }

    /// Remove the entry for a document and user. Missing entries are not an error.
    pub fn remove(&mut self, document_id: &DocId, user_id: &UserId) -> Option<AclEntry> {
        let users = self.index.get_mut(document_id)?;
        let pos = users.remove(user_id)?;
        if users.is_empty() {
            self.index.remove(document_id);
        }

        let removed = self.entries.remove(pos);
        for users in self.index.values_mut() {
            for slot in users.values_mut() {
                if *slot > pos {
                    *slot -= 1;
                }
            }
        }
        Some(removed)
    }

    /// Entries for one document, in insertion order.
    pub fn entries_for<'a>(
        &'a self,
        document_id: &'a DocId,
    ) -> impl Iterator<Item = &'a AclEntry> + Clone + 'a {
        self.entries
            .iter()
            .filter(move |entry| &entry.document_id == document_id)
    }

    /// Attach entries that carry no document to `document_id`.
    ///
    /// Entries that become duplicates of an existing pair are dropped, with
    /// the earlier entry winning as in [`Acl::from_entries`].
    pub fn bind_unset_documents(self, document_id: &DocId) -> Acl {
        if !self.entries.iter().any(|e| e.document_id.is_unset()) {
            return self;
        }
        Acl::from_entries(self.entries.into_iter().map(|mut entry| {
            if entry.document_id.is_unset() {
                entry.document_id = document_id.clone();
            }
            entry
        }))
    }

    fn push(&mut self, entry: AclEntry) {
        self.index
            .entry(entry.document_id.clone())
            .or_default()
            .insert(entry.user_id.clone(), self.entries.len());
        self.entries.push(entry);
    }
}

impl PartialEq for Acl {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Acl {}

impl From<Vec<AclEntry>> for Acl {
    fn from(entries: Vec<AclEntry>) -> Self {
        Acl::from_entries(entries)
    }
}

impl From<Acl> for Vec<AclEntry> {
    fn from(acl: Acl) -> Self {
        acl.into_entries()
    }
}

impl FromIterator<AclEntry> for Acl {
    fn from_iter<T: IntoIterator<Item = AclEntry>>(iter: T) -> Self {
        Acl::from_entries(iter)
    }
}

impl<'a> IntoIterator for &'a Acl {
    type Item = &'a AclEntry;
    type IntoIter = std::slice::Iter<'a, AclEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
