//! Centralized error types for Dealdesk.

use thiserror::Error;

use crate::entities::EntityKind;

/// Main error type for Dealdesk operations.
#[derive(Error, Debug)]
pub enum DeskError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("no relation declared between {a} and {b}")]
    UnknownRelation { a: EntityKind, b: EntityKind },

    #[error("cannot link {kind} {id} to itself")]
    SelfLoopRejected { kind: EntityKind, id: String },

    #[error("{kind} {id} is closed; its links are frozen")]
    LinkFrozen { kind: EntityKind, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Dealdesk operations.
pub type DeskResult<T> = Result<T, DeskError>;

impl DeskError {
    /// Create a not-found error.
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
