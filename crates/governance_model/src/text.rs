//! Case-insensitive comparison helpers used by both engines.

/// Case fold used wherever two identifiers or tags are compared
/// case-insensitively.
pub fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// Compare two strings case-insensitively.
pub fn same_folded(a: &str, b: &str) -> bool {
    a == b || fold(a) == fold(b)
}
