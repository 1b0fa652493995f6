//! Uniform result envelope returned by every service operation.
//!
//! Storage and collaborator faults never cross the service boundary as raw
//! errors. Each operation reclassifies what happened into one of four
//! outcomes, and callers branch on the variant rather than on whether a
//! payload is present.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The operation completed and produced its payload
    Success(T),
    /// The referenced entity does not exist
    NotFound,
    /// The request violates a business rule
    Forbidden,
    /// An unexpected collaborator failure; details are logged, not returned
    InternalFault,
}

/// Payload-free tag of an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    NotFound,
    Forbidden,
    InternalFault,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Success => "success",
            OutcomeKind::NotFound => "not_found",
            OutcomeKind::Forbidden => "forbidden",
            OutcomeKind::InternalFault => "internal_fault",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T> Outcome<T> {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Success(_) => OutcomeKind::Success,
            Outcome::NotFound => OutcomeKind::NotFound,
            Outcome::Forbidden => OutcomeKind::Forbidden,
            Outcome::InternalFault => OutcomeKind::InternalFault,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The payload, if the operation succeeded.
    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::NotFound => Outcome::NotFound,
            Outcome::Forbidden => Outcome::Forbidden,
            Outcome::InternalFault => Outcome::InternalFault,
        }
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self.into_result() {
            Ok(value) => Outcome::Success(f(value)),
            Err(failure) => failure,
        }
    }

    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self.into_result() {
            Ok(value) => f(value),
            Err(failure) => failure,
        }
    }

    /// Split into the payload or the failure, re-typed for any payload.
    ///
    /// Lets service code chain steps with `?` inside a function returning
    /// `Result<T, Outcome<T>>`.
    pub fn into_result<U>(self) -> Result<T, Outcome<U>> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::NotFound => Err(Outcome::NotFound),
            Outcome::Forbidden => Err(Outcome::Forbidden),
            Outcome::InternalFault => Err(Outcome::InternalFault),
        }
    }

    /// Log a collaborator fault and reclassify it.
    pub(crate) fn fault(operation: &'static str, err: &StoreError) -> Self {
        error!(operation, error = %err, "store fault");
        Outcome::InternalFault
    }
}

impl<T> From<Result<T, Outcome<T>>> for Outcome<T> {
    fn from(result: Result<T, Outcome<T>>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(failure) => failure,
        }
    }
}
