//! Persisted document and folder records.
//!
//! Only `acl` and `tags` are interpreted. Every other field of a record
//! (title, content payload, folder, timestamps) is kept as raw JSON and
//! written back as it was read.

use access_control::{assign_level_at, Acl, PermissionLevel};
use chrono::{DateTime, Utc};
use governance_model::{DocId, UserId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A document as the library stores it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub file_id: DocId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub acl: Acl,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Fields this crate does not interpret
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl DocumentRecord {
    /// Create a record whose creator holds `admin` on it.
    pub fn new(file_id: DocId, creator: &UserId) -> Self {
        Self::new_at(file_id, creator, Utc::now())
    }

    pub fn new_at(file_id: DocId, creator: &UserId, now: DateTime<Utc>) -> Self {
        let acl = assign_level_at(&file_id, creator, PermissionLevel::Admin, Acl::new(), now)
            .collection;
        DocumentRecord {
            file_id,
            acl,
            tags: Vec::new(),
            rest: Map::new(),
        }
    }

    /// Builder for an uninterpreted field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.rest.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.rest.get(key)
    }

    /// Attach ACL entries written without a document id to this record.
    pub fn bind_acl(mut self) -> Self {
        self.acl = self.acl.bind_unset_documents(&self.file_id);
        self
    }
}

/// A folder. Carried through unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Everything the store persists: the documents and the folders.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,
    #[serde(default)]
    pub folders: Vec<Folder>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self, file_id: &DocId) -> Option<&DocumentRecord> {
        self.documents.iter().find(|doc| &doc.file_id == file_id)
    }

    pub fn document_mut(&mut self, file_id: &DocId) -> Option<&mut DocumentRecord> {
        self.documents.iter_mut().find(|doc| &doc.file_id == file_id)
    }

    /// Bind stray ACL entries on every document; applied after loading.
    pub fn bind_acls(mut self) -> Self {
        self.documents = self
            .documents
            .into_iter()
            .map(DocumentRecord::bind_acl)
            .collect();
        self
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
