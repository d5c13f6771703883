//! Results of engine operations.
//!
//! Engines are functions from `(collection, operation)` to a new collection
//! plus an outcome. A success is an [`Applied`]; a validation failure is a
//! [`Rejected`] that hands the caller's collection back as it was given.

use crate::error::{ErrorCode, GovernanceError};
use serde::Serialize;

/// A successful transition: the new collection and what happened.
#[derive(Clone, Debug, PartialEq)]
pub struct Applied<C, O> {
    pub collection: C,
    pub outcome: O,
}

impl<C, O> Applied<C, O> {
    pub fn new(collection: C, outcome: O) -> Self {
        Self {
            collection,
            outcome,
        }
    }
}

/// A rejected transition. `unchanged` is the collection the caller passed in.
#[derive(Clone, Debug, PartialEq)]
pub struct Rejected<C> {
    pub error: GovernanceError,
    pub unchanged: C,
}

impl<C> Rejected<C> {
    pub fn new(error: GovernanceError, unchanged: C) -> Self {
        Self { error, unchanged }
    }
}

/// Outcome of any fallible engine operation.
pub type Transition<C, O> = Result<Applied<C, O>, Rejected<C>>;

/// Accessors shared by both arms of a [`Transition`].
pub trait TransitionExt<C, O> {
    /// The collection to persist: the new one on success, the original on rejection.
    fn into_collection(self) -> C;

    fn error(&self) -> Option<&GovernanceError>;
}

impl<C, O> TransitionExt<C, O> for Transition<C, O> {
    fn into_collection(self) -> C {
        match self {
            Ok(applied) => applied.collection,
            Err(rejected) => rejected.unchanged,
        }
    }

    fn error(&self) -> Option<&GovernanceError> {
        self.as_ref().err().map(|rejected| &rejected.error)
    }
}

/// Serializable outcome record handed to a presentation layer:
/// `{ "success": bool, "error"?: string, "code"?: string, ...fields }`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<O> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(flatten)]
    pub details: Option<O>,
}

impl<O> Report<O> {
    pub fn ok(details: O) -> Self {
        Self {
            success: true,
            error: None,
            code: None,
            details: Some(details),
        }
    }

    pub fn failed(error: &GovernanceError) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            code: Some(error.code()),
            details: None,
        }
    }

    pub fn from_transition<C>(transition: &Transition<C, O>) -> Self
    where
        O: Clone,
    {
        match transition {
            Ok(applied) => Self::ok(applied.outcome.clone()),
            Err(rejected) => Self::failed(&rejected.error),
        }
    }
}
