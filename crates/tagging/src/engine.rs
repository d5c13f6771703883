//! Add, remove, and rename tags on a document's tag list.
//!
//! Tag lists are passed in and handed back; a rejected batch returns the
//! caller's list exactly as given. Existing tags keep their stored spelling
//! and position.

use crate::validate::{normalize, validate, validate_tag};
use chrono::{DateTime, Utc};
use governance_model::text::{fold, same_folded};
use governance_model::{Applied, DocId, GovernanceError, Rejected, Transition};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagsAdded {
    pub document_id: DocId,
    /// Normalized tags appended to the list
    pub added: Vec<String>,
    /// Normalized tags dropped because the document already had them
    pub skipped: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagsRemoved {
    pub document_id: DocId,
    /// Tags taken off the list, as they were stored
    pub removed: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRenamed {
    pub document_id: DocId,
    pub from: String,
    pub to: String,
    /// False when nothing needed to change
    pub changed: bool,
    pub updated_at: DateTime<Utc>,
}

/// Add a batch of raw tags to a document.
///
/// Candidates that are blank after trimming are ignored. The rest must all
/// validate; otherwise the whole batch is rejected with the first error.
/// Tags the document already has (case-insensitively) are skipped, the others
/// are appended in batch order.
pub fn add_tags<S: AsRef<str>>(
    document_id: &DocId,
    new_tags: &[S],
    existing: Vec<String>,
) -> Transition<Vec<String>, TagsAdded> {
    let candidates: Vec<&str> = new_tags
        .iter()
        .map(AsRef::as_ref)
        .filter(|raw| !raw.trim().is_empty())
        .collect();

    let validated = match validate(candidates.as_slice()).into_result() {
        Ok(tags) => tags,
        Err(error) => return Err(Rejected::new(error, existing)),
    };

    let present: HashSet<String> = existing.iter().map(|tag| fold(tag)).collect();
    let (skipped, added): (Vec<String>, Vec<String>) =
        validated.into_iter().partition(|tag| present.contains(tag));

    let mut tags = existing;
    tags.extend(added.iter().cloned());

    let outcome = TagsAdded {
        document_id: document_id.clone(),
        added,
        skipped,
        updated_at: Utc::now(),
    };
    Ok(Applied::new(tags, outcome))
}

/// Remove tags from a document, comparing case-insensitively.
/// Tags the document does not have are ignored.
pub fn remove_tags<S: AsRef<str>>(
    document_id: &DocId,
    tags_to_remove: &[S],
    existing: Vec<String>,
) -> Applied<Vec<String>, TagsRemoved> {
    let doomed: HashSet<String> = tags_to_remove
        .iter()
        .map(|tag| normalize(tag.as_ref()))
        .collect();

    let (removed, kept): (Vec<String>, Vec<String>) = existing
        .into_iter()
        .partition(|tag| doomed.contains(&fold(tag)));

    let outcome = TagsRemoved {
        document_id: document_id.clone(),
        removed,
        updated_at: Utc::now(),
    };
    Applied::new(kept, outcome)
}

/// Rename one tag on a document, keeping its position.
///
/// The new name is normalized and validated. Renaming a tag to itself, or
/// renaming a tag the document does not have, succeeds without changes.
/// A new name that matches a different tag on the document is rejected with
/// `TagAlreadyExists`.
pub fn edit_tag(
    document_id: &DocId,
    old_tag: &str,
    new_tag: &str,
    existing: Vec<String>,
) -> Transition<Vec<String>, TagRenamed> {
    let to = match validate_tag(new_tag) {
        Ok(tag) => tag,
        Err(error) => return Err(Rejected::new(error, existing)),
    };
    let from = normalize(old_tag);

    if to == from {
        return Ok(unchanged(document_id, existing, from, to));
    }

    let collides = existing
        .iter()
        .any(|tag| same_folded(tag, &to) && !same_folded(tag, &from));
    if collides {
        return Err(Rejected::new(
            GovernanceError::TagAlreadyExists { tag: to },
            existing,
        ));
    }

    let Some(pos) = existing.iter().position(|tag| same_folded(tag, &from)) else {
        return Ok(unchanged(document_id, existing, from, to));
    };

    let mut tags = existing;
    tags[pos] = to.clone();

    let outcome = TagRenamed {
        document_id: document_id.clone(),
        from,
        to,
        changed: true,
        updated_at: Utc::now(),
    };
    Ok(Applied::new(tags, outcome))
}

/// Whether any tag contains `term`, ignoring case. An empty term matches
/// every tag list, including an empty one.
pub fn tags_match<S: AsRef<str>>(tags: &[S], term: &str) -> bool {
    let term = fold(term);
    term.is_empty() || tags.iter().any(|tag| fold(tag.as_ref()).contains(&term))
}

fn unchanged(
    document_id: &DocId,
    existing: Vec<String>,
    from: String,
    to: String,
) -> Applied<Vec<String>, TagRenamed> {
    let outcome = TagRenamed {
        document_id: document_id.clone(),
        from,
        to,
        changed: false,
        updated_at: Utc::now(),
    };
    Applied::new(existing, outcome)
}
