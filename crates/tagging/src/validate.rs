//! Tag normalization and validation rules.

use governance_model::GovernanceError;
use regex_lite::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Minimum tag length, in characters, after normalization.
pub const MIN_TAG_LEN: usize = 2;
/// Maximum tag length, in characters, after normalization.
pub const MAX_TAG_LEN: usize = 30;

const TAG_PATTERN: &str = r"^[a-z0-9_-]+$";

fn tag_format() -> &'static Regex {
    static FORMAT: OnceLock<Regex> = OnceLock::new();
    FORMAT.get_or_init(|| Regex::new(TAG_PATTERN).expect("tag pattern is a valid regex"))
}

/// Canonical stored form of a tag: surrounding whitespace trimmed, lowercased.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Check one normalized tag against the per-tag rules, in order.
///
/// `given` is the caller's spelling, used in error messages.
fn check_rules(given: &str, normalized: &str) -> Result<(), GovernanceError> {
    if normalized.is_empty() {
        return Err(GovernanceError::EmptyTag);
    }

    let len = normalized.chars().count();
    if len < MIN_TAG_LEN {
        return Err(GovernanceError::TooShort {
            tag: given.to_string(),
            min: MIN_TAG_LEN,
        });
    }
    if len > MAX_TAG_LEN {
        return Err(GovernanceError::TooLong {
            tag: given.to_string(),
            max: MAX_TAG_LEN,
        });
    }

    if !tag_format().is_match(normalized) {
        return Err(GovernanceError::InvalidFormat {
            tag: given.to_string(),
        });
    }

    Ok(())
}

/// Check a single candidate tag on its own.
pub fn validate_tag(candidate: &str) -> Result<String, GovernanceError> {
    let normalized = normalize(candidate);
    check_rules(candidate, &normalized)?;
    Ok(normalized)
}

/// Result of validating a batch of candidate tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validation {
    /// Normalized tags that passed every rule, in batch order
    pub valid_tags: Vec<String>,
    /// One error per rejected candidate, in batch order
    pub errors: Vec<GovernanceError>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn first_error(&self) -> Option<&GovernanceError> {
        self.errors.first()
    }

    /// The normalized tags if the whole batch passed, else the first error.
    pub fn into_result(mut self) -> Result<Vec<String>, GovernanceError> {
        if self.is_valid() {
            Ok(self.valid_tags)
        } else {
            Err(self.errors.swap_remove(0))
        }
    }
}

/// Validate a batch of candidates.
///
/// Each candidate is normalized and checked in order for: empty, too short,
/// too long, bad characters, and a repeat of an earlier candidate in the
/// batch. The first failing rule decides that candidate's error; the rest of
/// the batch is still checked.
pub fn validate<S: AsRef<str>>(candidates: &[S]) -> Validation {
    let mut validation = Validation::default();
    let mut seen = HashSet::new();

    for candidate in candidates {
        let given = candidate.as_ref();
        let normalized = normalize(given);

        if let Err(error) = check_rules(given, &normalized) {
            validation.errors.push(error);
            continue;
        }

        if !seen.insert(normalized.clone()) {
            validation.errors.push(GovernanceError::DuplicateInBatch {
                tag: given.to_string(),
            });
            continue;
        }

        validation.valid_tags.push(normalized);
    }

    validation
}
