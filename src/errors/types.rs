//! Error type definitions for the registry
//!
//! The hierarchy mirrors the layers: `RepositoryError` for the store,
//! `LifecycleError` and `ReferenceError` for the two consistency mechanisms,
//! and `AppError` as the request-boundary type that wraps them all.

use thiserror::Error;

use crate::models::{EntityKey, EntityKind, ReferenceSet};

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors (SeaORM)
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Repository layer errors
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Rejected lifecycle transitions
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// Reference validation failures
    #[error("Reference error: {0}")]
    Reference(#[from] ReferenceError),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Resource not found errors
    #[error("Not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },
}

/// Repository layer specific errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database errors from SeaORM
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A store call did not finish inside its deadline
    #[error("Operation timed out: {operation} after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u128 },

    /// Record not found
    #[error("Record not found: {table} with {field} = {value}")]
    RecordNotFound { table: String, field: String, value: String },

    /// A unique natural key is already taken
    #[error("Duplicate key in {table}: {message}")]
    DuplicateKey { table: String, message: String },

    /// The operation is not defined for this entity kind
    #[error("Unsupported operation: {operation} on {table}")]
    Unsupported { operation: String, table: String },
}

/// Rejections produced by the lifecycle guard
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// No row exists for the key
    #[error("{kind} with key {key} not found")]
    NotFound { kind: EntityKind, key: EntityKey },

    /// The row is soft-deleted; nothing may change its state any more
    #[error("{kind} with key {key} is deleted")]
    TerminalState { kind: EntityKind, key: EntityKey },

    /// Requested state equals the current one
    #[error("{kind} with key {key} is already {state}")]
    NoOpTransition {
        kind: EntityKind,
        key: EntityKey,
        state: &'static str,
    },

    /// The conditional write matched no row: the state moved between read and write
    #[error("{kind} with key {key} changed concurrently, transition not applied")]
    StaleTransition { kind: EntityKind, key: EntityKey },

    /// The entity kind carries no lifecycle state
    #[error("{kind} has no lifecycle state")]
    Unsupported { kind: EntityKind },
}

/// Reference validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// A dependent write referenced an id that is not in the named set
    #[error("Invalid reference: {field} = {id} is not a valid {set}")]
    InvalidReference {
        field: &'static str,
        set: ReferenceSet,
        id: i32,
    },

    /// The id being created is already a member of its own set
    #[error("{set} with id {id} already exists")]
    AlreadyExists { set: ReferenceSet, id: i32 },

    /// The id being updated is not a member of its own set
    #[error("{set} with id {id} does not exist")]
    NotMember { set: ReferenceSet, id: i32 },

    /// A refresh could not reach the store; the previous snapshot is still served
    #[error("Reference set {set} is degraded: {message}")]
    CacheDegraded { set: ReferenceSet, message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<R: Into<String>, I: ToString>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }
}

impl RepositoryError {
    /// Create a record-not-found error for a table/field pair
    pub fn record_not_found<T: Into<String>, F: Into<String>, V: ToString>(
        table: T,
        field: F,
        value: V,
    ) -> Self {
        Self::RecordNotFound {
            table: table.into(),
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Classify an insert failure, separating unique-key violations from other errors
    pub fn from_insert<T: Into<String>>(table: T, err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(message)) => Self::DuplicateKey {
                table: table.into(),
                message,
            },
            _ => Self::Database(err),
        }
    }

    /// Whether this error means the store could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. }
                | Self::Database(sea_orm::DbErr::Conn(_))
                | Self::Database(sea_orm::DbErr::ConnectionAcquire(_))
        )
    }
}
