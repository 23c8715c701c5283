use std::fmt;

use thiserror::Error;

/// Number of positional arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exactly(usize),
    /// At least this many arguments, followed by an even number of extra ones.
    AtLeastThenPairs(usize),
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {n}"),
            Arity::AtLeastThenPairs(n) => write!(f, "at least {n}, then pairs"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TrackerError {
    #[error("Tracker error, internal tracker API error")]
    InternalTrackerError,

    #[error(
        "Tracker error, incorrect number of arguments for '{function}' (expected: {expected}, got: {got})"
    )]
    InvalidArgumentCount { function: String, expected: Arity, got: usize },

    #[error("Tracker error, field must not be empty (field: {0})")]
    EmptyField(&'static str),

    #[error("Tracker error, asset already exists (id: {0})")]
    AlreadyExists(String),

    #[error("Tracker error, asset does not exist (id: {0})")]
    NotExists(String),

    #[error("Tracker error, asset not found (id: {0})")]
    NotFound(String),

    #[error("Tracker error, failed to decode asset record: {0}")]
    DecodeError(String),

    #[error("Tracker error, failed to encode asset record: {0}")]
    EncodeError(String),

    #[error("Tracker error, ledger fault: {0}")]
    LedgerFault(String),

    #[error("Tracker error, failed to read state (key: {key}): {reason}")]
    StoreReadFailed { key: String, reason: String },

    #[error("Tracker error, failed to write state (key: {key}): {reason}")]
    StoreWriteFailed { key: String, reason: String },

    #[error("Tracker error, failed to delete state (key: {key}): {reason}")]
    StoreDeleteFailed { key: String, reason: String },

    #[error("Tracker error, received unknown function name '{0}'")]
    UnknownFunction(String),
}

impl TrackerError {
    /// Reason carried by a ledger failure, or the full message for any other error.
    pub(crate) fn into_reason(self) -> String {
        match self {
            TrackerError::LedgerFault(reason) => reason,
            other => other.to_string(),
        }
    }
}
