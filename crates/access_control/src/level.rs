//! Permission levels and their hierarchy.

use governance_model::GovernanceError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Permission levels in order of increasing access.
///
/// A higher level subsumes every capability of the levels below it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// Can open and read the document
    View = 0,
    /// Can fetch the document content
    Download = 1,
    /// Can change content and metadata, including tags
    Edit = 2,
    /// Full control including permissions and deletion
    Admin = 3,
}

impl PermissionLevel {
    /// Every level, lowest first.
    pub const ALL: [PermissionLevel; 4] = [
        PermissionLevel::View,
        PermissionLevel::Download,
        PermissionLevel::Edit,
        PermissionLevel::Admin,
    ];

    /// Numeric rank in the hierarchy (view = 0 .. admin = 3).
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PermissionLevel::View => "view",
            PermissionLevel::Download => "download",
            PermissionLevel::Edit => "edit",
            PermissionLevel::Admin => "admin",
        }
    }

    /// Check if this level grants at least `required`.
    pub fn satisfies(self, required: PermissionLevel) -> bool {
        self >= required
    }

    /// Check if this level allows viewing
    pub fn can_view(self) -> bool {
        self.satisfies(PermissionLevel::View)
    }

    /// Check if this level allows downloading
    pub fn can_download(self) -> bool {
        self.satisfies(PermissionLevel::Download)
    }

    /// Check if this level allows editing
    pub fn can_edit(self) -> bool {
        self.satisfies(PermissionLevel::Edit)
    }

    /// Check if this level allows managing permissions and deletion
    pub fn can_administer(self) -> bool {
        self == PermissionLevel::Admin
    }
}

impl FromStr for PermissionLevel {
    type Err = GovernanceError;

    /// Parses the exact lowercase wire names; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(PermissionLevel::View),
            "download" => Ok(PermissionLevel::Download),
            "edit" => Ok(PermissionLevel::Edit),
            "admin" => Ok(PermissionLevel::Admin),
            other => Err(GovernanceError::InvalidPermissionLevel {
                given: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
