//! Tagged results of the conditional store operations.
//!
//! A failed precondition is an ordinary outcome, not an error. `LimitError` is
//! left for bad input and storage failures.

use super::client::{ClientKey, ClientPixRecord, PixLimit};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(ClientPixRecord),
    /// A record already exists for this key; nothing was written.
    Conflict(ClientKey),
}

impl CreateOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created(_))
    }
}

impl fmt::Display for CreateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateOutcome::Created(record) => {
                write!(f, "created record for {}", record.key())
            }
            CreateOutcome::Conflict(key) => {
                write!(f, "a record already exists for {}", key)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitUpdate {
    Updated,
    NotFound,
}

impl LimitUpdate {
    pub fn is_updated(self) -> bool {
        self == LimitUpdate::Updated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    NotFound,
}

impl Deletion {
    pub fn is_deleted(self) -> bool {
        self == Deletion::Deleted
    }
}

/// Result of a conditional debit.
///
/// `Denied` covers both a missing record and an insufficient limit; the store
/// evaluates them as one precondition and does not report which one failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitOutcome {
    Approved { new_limit: PixLimit },
    Denied,
}

impl DebitOutcome {
    pub fn is_approved(self) -> bool {
        matches!(self, DebitOutcome::Approved { .. })
    }

    pub fn new_limit(self) -> Option<PixLimit> {
        match self {
            DebitOutcome::Approved { new_limit } => Some(new_limit),
            DebitOutcome::Denied => None,
        }
    }
}
