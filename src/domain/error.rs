//! Error types for the catalog grid.
//!
//! This module defines the centralized error type [`GridError`] and a type alias
//! [`Result`] used throughout the crate. Every component returns these errors;
//! the application layer turns them into [`ErrorKind`]-tagged notices on the
//! read model instead of letting them escape into the rendering layer.

use crate::domain::record::{Column, RecordId};
use thiserror::Error;

/// The main error type for grid operations.
///
/// # Examples
///
/// ```
/// use catalog_grid::domain::{GridError, RecordId};
///
/// fn find(id: RecordId) -> Result<(), GridError> {
///     Err(GridError::RecordNotFound(id))
/// }
///
/// assert!(find(RecordId(7)).is_err());
/// ```
#[derive(Debug, Error)]
pub enum GridError {
    /// The catalog fetch failed or returned a body that does not match the
    /// expected record schema.
    #[error("Catalog source unavailable: {0}")]
    SourceUnavailable(String),

    /// A record with this id already exists in the store.
    #[error("Duplicate record id: {0}")]
    DuplicateKey(RecordId),

    /// No record with this id exists in the store.
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    /// A view parameter was rejected (non-positive page size, unknown sort key).
    #[error("Invalid view parameter: {0}")]
    InvalidViewParameter(String),

    /// An edit session is already open for another record.
    #[error("Edit already in progress for record {0}")]
    EditInProgress(RecordId),

    /// A draft operation was requested while no edit session is open.
    #[error("No edit in progress")]
    NoActiveEdit,

    /// A draft field received a value it cannot hold.
    #[error("Invalid value {value:?} for field {field}")]
    InvalidFieldValue {
        /// Field being edited.
        field: Column,
        /// Raw value that was rejected.
        value: String,
    },

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cloneable category of a [`GridError`], exposed on the read model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SourceUnavailable,
    DuplicateKey,
    RecordNotFound,
    InvalidViewParameter,
    EditInProgress,
    NoActiveEdit,
    InvalidFieldValue,
    Config,
    Io,
}

impl GridError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceUnavailable(_) => ErrorKind::SourceUnavailable,
            Self::DuplicateKey(_) => ErrorKind::DuplicateKey,
            Self::RecordNotFound(_) => ErrorKind::RecordNotFound,
            Self::InvalidViewParameter(_) => ErrorKind::InvalidViewParameter,
            Self::EditInProgress(_) => ErrorKind::EditInProgress,
            Self::NoActiveEdit => ErrorKind::NoActiveEdit,
            Self::InvalidFieldValue { .. } => ErrorKind::InvalidFieldValue,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// A specialized `Result` type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
