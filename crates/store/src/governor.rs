//! Coordinator between callers, the engines, and a library store.
//!
//! The governor is the caller the engines expect: it resolves who is acting,
//! applies the superuser override before any ACL lookup, hands a document's
//! `acl` or `tags` to the matching engine, and writes the result back with a
//! compare-and-swap save. Rejected input produces an unsuccessful
//! [`Report`] and leaves the library untouched.

use crate::error::{GovernError, GovernResult};
use crate::record::DocumentRecord;
use crate::settings::GovernanceSettings;
use crate::storage::LibraryStore;
use access_control::{
    assign_permission, grant_counts, has_permission, list_users_with_access, revoke, Assignment,
    GrantCounts, PermissionLevel, Revocation, UserAccess,
};
use governance_model::{DocId, GovernanceError, Report, Transition, UserId};
use tagging::{add_tags, edit_tag, remove_tags, tags_match, TagRenamed, TagsAdded, TagsRemoved};
use tracing::{debug, info, warn};

/// Applies governance operations to documents held in a [`LibraryStore`].
pub struct Governor<S> {
    store: S,
    settings: GovernanceSettings,
}

impl<S: LibraryStore> Governor<S> {
    pub fn new(store: S, settings: GovernanceSettings) -> Self {
        Self { store, settings }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &GovernanceSettings {
        &self.settings
    }

    /// Whether `actor` may act at `required` on `record`.
    ///
    /// Superusers pass without consulting the ACL.
    pub fn can(&self, actor: &UserId, record: &DocumentRecord, required: PermissionLevel) -> bool {
        if self.settings.is_superuser(actor) {
            info!(actor = %actor, document = %record.file_id, %required, "superuser override");
            return true;
        }
        has_permission(&record.file_id, actor, required, &record.acl)
    }

    /// Load the library and check `actor` against one document.
    pub fn check(
        &self,
        actor: &UserId,
        document: &DocId,
        required: PermissionLevel,
    ) -> GovernResult<bool> {
        let stored = self.store.load()?;
        let record = stored
            .library
            .document(document)
            .ok_or_else(|| GovernError::DocumentNotFound(document.clone()))?;
        Ok(self.can(actor, record, required))
    }

    /// Documents `actor` can open at `required` or above, in library order.
    pub fn accessible_documents(
        &self,
        actor: &UserId,
        required: PermissionLevel,
    ) -> GovernResult<Vec<DocId>> {
        let stored = self.store.load()?;
        Ok(stored
            .library
            .documents
            .iter()
            .filter(|record| self.can(actor, record, required))
            .map(|record| record.file_id.clone())
            .collect())
    }

    /// Documents `actor` can view that carry a tag containing `term`,
    /// ignoring case, in library order.
    pub fn documents_tagged(&self, actor: &UserId, term: &str) -> GovernResult<Vec<DocId>> {
        let stored = self.store.load()?;
        Ok(stored
            .library
            .documents
            .iter()
            .filter(|record| tags_match(record.tags.as_slice(), term))
            .filter(|record| self.can(actor, record, PermissionLevel::View))
            .map(|record| record.file_id.clone())
            .collect())
    }

    /// Grants per level on a document. Requires `admin`.
    pub fn grant_counts(&self, actor: &UserId, document: &DocId) -> GovernResult<GrantCounts> {
        let stored = self.store.load()?;
        let record = stored
            .library
            .document(document)
            .ok_or_else(|| GovernError::DocumentNotFound(document.clone()))?;
        self.authorize(actor, record, PermissionLevel::Admin)?;
        Ok(grant_counts(document, &record.acl))
    }

    /// Users with access to a document. Requires `admin`.
    pub fn users_with_access(
        &self,
        actor: &UserId,
        document: &DocId,
    ) -> GovernResult<Vec<UserAccess>> {
        let stored = self.store.load()?;
        let record = stored
            .library
            .document(document)
            .ok_or_else(|| GovernError::DocumentNotFound(document.clone()))?;
        self.authorize(actor, record, PermissionLevel::Admin)?;
        Ok(list_users_with_access(document, &record.acl).collect())
    }

    /// Toggle or assign `level` for `user`. Requires `admin`.
    pub fn assign_permission(
        &self,
        actor: &UserId,
        document: &DocId,
        user: &UserId,
        level: &str,
    ) -> GovernResult<Report<Assignment>> {
        self.mutate(actor, document, PermissionLevel::Admin, "assign_permission", |record| {
            let acl = std::mem::take(&mut record.acl);
            settle(&mut record.acl, assign_permission(document, user, level, acl))
        })
    }

    /// Remove whatever `user` holds on the document. Requires `admin`.
    pub fn remove_permission(
        &self,
        actor: &UserId,
        document: &DocId,
        user: &UserId,
    ) -> GovernResult<Report<Revocation>> {
        self.mutate(actor, document, PermissionLevel::Admin, "remove_permission", |record| {
            let acl = std::mem::take(&mut record.acl);
            settle(&mut record.acl, Ok(revoke(document, user, acl)))
        })
    }

    /// Add tags to a document. Requires `edit`.
    pub fn add_tags<T: AsRef<str>>(
        &self,
        actor: &UserId,
        document: &DocId,
        tags: &[T],
    ) -> GovernResult<Report<TagsAdded>> {
        self.mutate(actor, document, PermissionLevel::Edit, "add_tags", |record| {
            let existing = std::mem::take(&mut record.tags);
            settle(&mut record.tags, add_tags(document, tags, existing))
        })
    }

    /// Remove tags from a document. Requires `edit`.
    pub fn remove_tags<T: AsRef<str>>(
        &self,
        actor: &UserId,
        document: &DocId,
        tags: &[T],
    ) -> GovernResult<Report<TagsRemoved>> {
        self.mutate(actor, document, PermissionLevel::Edit, "remove_tags", |record| {
            let existing = std::mem::take(&mut record.tags);
            settle(&mut record.tags, Ok(remove_tags(document, tags, existing)))
        })
    }

    /// Rename a tag on a document. Requires `edit`.
    pub fn edit_tag(
        &self,
        actor: &UserId,
        document: &DocId,
        old_tag: &str,
        new_tag: &str,
    ) -> GovernResult<Report<TagRenamed>> {
        self.mutate(actor, document, PermissionLevel::Edit, "edit_tag", |record| {
            let existing = std::mem::take(&mut record.tags);
            settle(&mut record.tags, edit_tag(document, old_tag, new_tag, existing))
        })
    }

    fn authorize(
        &self,
        actor: &UserId,
        record: &DocumentRecord,
        required: PermissionLevel,
    ) -> GovernResult<()> {
        if self.can(actor, record, required) {
            return Ok(());
        }
        warn!(actor = %actor, document = %record.file_id, %required, "permission denied");
        Err(GovernError::Denied {
            user: actor.clone(),
            document: record.file_id.clone(),
            required,
        })
    }

    /// Load, authorize, apply `op` to one record, and save on success.
    fn mutate<O, F>(
        &self,
        actor: &UserId,
        document: &DocId,
        required: PermissionLevel,
        operation: &'static str,
        op: F,
    ) -> GovernResult<Report<O>>
    where
        F: FnOnce(&mut DocumentRecord) -> Result<O, GovernanceError>,
    {
        let mut stored = self.store.load()?;
        let record = stored
            .library
            .document_mut(document)
            .ok_or_else(|| GovernError::DocumentNotFound(document.clone()))?;
        self.authorize(actor, record, required)?;

        let outcome = match op(record) {
            Ok(outcome) => outcome,
            Err(error) => {
                debug!(operation, document = %document, code = %error.code(), "rejected: {error}");
                return Ok(Report::failed(&error));
            }
        };

        let revision = self
            .store
            .save(&stored.library, stored.revision)
            .inspect_err(|e| warn!(operation, document = %document, "save failed: {e}"))?;
        debug!(operation, document = %document, actor = %actor, %revision, "applied");
        Ok(Report::ok(outcome))
    }
}

/// Put a transition's collection back into `slot` and surface the outcome.
fn settle<C, O>(slot: &mut C, transition: Transition<C, O>) -> Result<O, GovernanceError> {
    match transition {
        Ok(applied) => {
            *slot = applied.collection;
            Ok(applied.outcome)
        }
        Err(rejected) => {
            *slot = rejected.unchanged;
            Err(rejected.error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::MemoryLibraryStore;
    use crate::record::Library;
    use crate::storage::Revision;
    use governance_model::ErrorCode;

    fn governor_with(settings: GovernanceSettings) -> Governor<MemoryLibraryStore> {
        let mut library = Library::new();
        library
            .documents
            .push(DocumentRecord::new("d1".into(), &"owner".into()).with_field("title", "Plan"));
        Governor::new(MemoryLibraryStore::with_library(library), settings)
    }

    fn owner() -> UserId {
        UserId::from("owner")
    }

    fn doc() -> DocId {
        DocId::from("d1")
    }

    #[test]
    fn test_owner_grants_and_user_gains_access() {
        let governor = governor_with(GovernanceSettings::default());
        let report = governor
            .assign_permission(&owner(), &doc(), &"u1".into(), "edit")
            .unwrap();
        assert!(report.success);

        assert!(governor.check(&"u1".into(), &doc(), PermissionLevel::Download).unwrap());
        assert!(!governor.check(&"u1".into(), &doc(), PermissionLevel::Admin).unwrap());
        assert_eq!(governor.store().load().unwrap().revision, Revision(1));
    }

    #[test]
    fn test_non_admin_cannot_grant() {
        let governor = governor_with(GovernanceSettings::default());
        governor
            .assign_permission(&owner(), &doc(), &"u1".into(), "edit")
            .unwrap();

        let err = governor
            .assign_permission(&"u1".into(), &doc(), &"u2".into(), "view")
            .unwrap_err();
        assert!(matches!(
            err,
            GovernError::Denied {
                required: PermissionLevel::Admin,
                ..
            }
        ));
    }

    #[test]
    fn test_superuser_bypasses_acl() {
        let governor = governor_with(GovernanceSettings::default().with_superuser("root"));
        assert!(governor.check(&"root".into(), &doc(), PermissionLevel::Admin).unwrap());

        let report = governor
            .add_tags(&"root".into(), &doc(), &["Ops"])
            .unwrap();
        assert!(report.success);

        // the engine itself knows nothing about superusers
        let stored = governor.store().load().unwrap();
        let record = stored.library.document(&doc()).unwrap();
        assert!(!has_permission(&doc(), &"root".into(), PermissionLevel::View, &record.acl));
        assert_eq!(record.tags, vec!["ops"]);
    }

    #[test]
    fn test_rejection_is_reported_and_not_saved() {
        let governor = governor_with(GovernanceSettings::default());
        let report = governor
            .assign_permission(&owner(), &doc(), &"u1".into(), "owner")
            .unwrap();
        assert!(!report.success);
        assert_eq!(report.code, Some(ErrorCode::InvalidPermissionLevel));
        assert_eq!(governor.store().load().unwrap().revision, Revision::initial());

        let report = governor.add_tags(&owner(), &doc(), &["a"]).unwrap();
        assert_eq!(report.code, Some(ErrorCode::TooShort));
    }

    #[test]
    fn test_missing_document() {
        let governor = governor_with(GovernanceSettings::default());
        let err = governor
            .remove_tags(&owner(), &"nope".into(), &["x"])
            .unwrap_err();
        assert!(matches!(err, GovernError::DocumentNotFound(_)));
    }

    #[test]
    fn test_editor_manages_tags_but_viewer_cannot() {
        let governor = governor_with(GovernanceSettings::default());
        governor
            .assign_permission(&owner(), &doc(), &"ed".into(), "edit")
            .unwrap();
        governor
            .assign_permission(&owner(), &doc(), &"vi".into(), "view")
            .unwrap();

        assert!(governor.add_tags(&"ed".into(), &doc(), &["draft"]).unwrap().success);
        let renamed = governor
            .edit_tag(&"ed".into(), &doc(), "draft", "final")
            .unwrap();
        assert!(renamed.details.unwrap().changed);

        let err = governor
            .remove_tags(&"vi".into(), &doc(), &["final"])
            .unwrap_err();
        assert!(matches!(err, GovernError::Denied { .. }));
    }

    #[test]
    fn test_remove_permission_and_listing() {
        let governor = governor_with(GovernanceSettings::default());
        governor
            .assign_permission(&owner(), &doc(), &"u1".into(), "view")
            .unwrap();

        let users = governor.users_with_access(&owner(), &doc()).unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.user_id.as_str()).collect();
        assert_eq!(names, vec!["owner", "u1"]);

        let report = governor
            .remove_permission(&owner(), &doc(), &"u1".into())
            .unwrap();
        assert_eq!(report.details.unwrap().revoked, Some(PermissionLevel::View));
        assert_eq!(
            governor
                .accessible_documents(&"u1".into(), PermissionLevel::View)
                .unwrap(),
            Vec::<DocId>::new()
        );
    }

    #[test]
    fn test_documents_tagged_respects_access() {
        let mut library = Library::new();
        library.documents.push(DocumentRecord::new("d1".into(), &"owner".into()));
        library.documents.push(DocumentRecord::new("d2".into(), &"other".into()));
        let governor = Governor::new(
            MemoryLibraryStore::with_library(library),
            GovernanceSettings::default(),
        );
        governor.add_tags(&owner(), &doc(), &["Finance"]).unwrap();
        governor
            .add_tags(&"other".into(), &"d2".into(), &["refinance"])
            .unwrap();

        assert_eq!(governor.documents_tagged(&owner(), "FIN").unwrap(), vec![doc()]);
        assert_eq!(
            governor.documents_tagged(&"other".into(), "fin").unwrap(),
            vec![DocId::from("d2")]
        );
        assert!(governor.documents_tagged(&owner(), "budget").unwrap().is_empty());
    }

    #[test]
    fn test_grant_counts_require_admin() {
        let governor = governor_with(GovernanceSettings::default());
        governor
            .assign_permission(&owner(), &doc(), &"u1".into(), "edit")
            .unwrap();
        governor
            .assign_permission(&owner(), &doc(), &"u2".into(), "edit")
            .unwrap();

        let counts = governor.grant_counts(&owner(), &doc()).unwrap();
        assert_eq!(counts.edit, 2);
        assert_eq!(counts.admin, 1);

        let err = governor.grant_counts(&"u1".into(), &doc()).unwrap_err();
        assert!(matches!(err, GovernError::Denied { .. }));
    }
}
