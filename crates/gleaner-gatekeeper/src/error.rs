//! Gatekeeper error types

use std::fmt;
use thiserror::Error;

/// Why a candidate was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// Category is not one of activity, competition, conference
    InvalidCategory,

    /// Title is empty after trimming
    MissingTitle,

    /// A date does not parse in its fixed format
    InvalidDate,

    /// `end_date` precedes `start_date`
    DateOrderViolation,

    /// Two sub-events of the same candidate share an id
    DuplicateSubEventId,

    /// A sub-event has no id
    MissingSubEventId,

    /// Strict mode: description is empty
    MissingDescription,

    /// Strict mode: no tags
    MissingTags,

    /// Strict mode: no sub-events
    MissingSubEvents,
}

impl ValidationErrorKind {
    /// Stable name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::InvalidCategory => "InvalidCategory",
            ValidationErrorKind::MissingTitle => "MissingTitle",
            ValidationErrorKind::InvalidDate => "InvalidDate",
            ValidationErrorKind::DateOrderViolation => "DateOrderViolation",
            ValidationErrorKind::DuplicateSubEventId => "DuplicateSubEventId",
            ValidationErrorKind::MissingSubEventId => "MissingSubEventId",
            ValidationErrorKind::MissingDescription => "MissingDescription",
            ValidationErrorKind::MissingTags => "MissingTags",
            ValidationErrorKind::MissingSubEvents => "MissingSubEvents",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected candidate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ValidationError {
    /// Rule that failed
    pub kind: ValidationErrorKind,

    /// Human-readable detail
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
