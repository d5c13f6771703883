//! Opaque identifiers for documents and users.

use serde::{Deserialize, Serialize};

/// User identifier
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        UserId(s)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Document identifier
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(pub String);

impl DocId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty identifier, which older records carry when an
    /// ACL entry was written without its document.
    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for DocId {
    fn from(s: &str) -> Self {
        DocId(s.to_string())
    }
}

impl From<String> for DocId {
    fn from(s: String) -> Self {
        DocId(s)
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_from_string() {
        let user_id: UserId = "user1".into();
        assert_eq!(user_id.0, "user1");

        let user_id: UserId = String::from("user2").into();
        assert_eq!(user_id.as_str(), "user2");
    }

    #[test]
    fn test_doc_id_from_string() {
        let doc_id: DocId = "doc1".into();
        assert_eq!(doc_id.0, "doc1");
        assert!(!doc_id.is_unset());
        assert!(DocId::default().is_unset());
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&DocId::from("file_1")).unwrap();
        assert_eq!(json, "\"file_1\"");

        let user: UserId = serde_json::from_str("\"role_admin\"").unwrap();
        assert_eq!(user, UserId::from("role_admin"));
    }
}
