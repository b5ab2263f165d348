//! Unified error types for all layers of the data-access stack.

use thiserror::Error;

/// Unified error type for Tessera HR.
///
/// Errors are sentinel values returned synchronously to the caller; there
/// is no retry or recovery policy beyond propagation.
#[derive(Error, Debug)]
pub enum TesseraError {
    // ============ Domain Errors ============
    /// Record not found
    #[error("Record not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Identifier already exists within the tenant scope
    #[error("Duplicate identifier: {resource_type} with id {id}")]
    DuplicateId {
        resource_type: &'static str,
        id: String,
    },

    /// Referenced entity does not exist (e.g. unknown business or staff id)
    #[error("Invalid reference: {resource_type} with id {id}")]
    InvalidReference {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TesseraError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::DuplicateId { .. } => "DUPLICATE_ID",
            Self::InvalidReference { .. } => "INVALID_REFERENCE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a record.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a duplicate identifier error.
    #[must_use]
    pub fn duplicate_id<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::DuplicateId {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates an invalid reference error.
    #[must_use]
    pub fn invalid_reference<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::InvalidReference {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a database error.
    #[must_use]
    pub fn database<T: Into<String>>(message: T) -> Self {
        Self::Database(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for TesseraError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        match err.kind.as_ref() {
            // Server-side unique index violation
            ErrorKind::Write(WriteFailure::WriteError(write_err)) if write_err.code == 11000 => {
                Self::DuplicateId {
                    resource_type: "document",
                    id: "unknown".to_string(),
                }
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for TesseraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON error: {}", err))
    }
}

impl From<bson::ser::Error> for TesseraError {
    fn from(err: bson::ser::Error) -> Self {
        Self::Serialization(format!("BSON serialization error: {}", err))
    }
}

impl From<bson::de::Error> for TesseraError {
    fn from(err: bson::de::Error) -> Self {
        Self::Serialization(format!("BSON deserialization error: {}", err))
    }
}
