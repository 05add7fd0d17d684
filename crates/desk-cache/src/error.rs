//! Error types for backend calls and cache operations
//!
//! Errors are `Clone` because one failed fetch is reported to every caller
//! waiting on it.

use desk_meta::{DocKey, DocStatus};

/// Server rejection of a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRejection {
    pub fieldname: String,
    pub message: String,
}

/// Failures reported by a [`Backend`](crate::Backend)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Metadata or document absent
    #[error("{what} not found")]
    NotFound { what: String },

    /// Caller may not read or modify the resource
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Server-side validation refused the document
    #[error("rejected by server: {message}")]
    ValidationRejected {
        message: String,
        fields: Vec<FieldRejection>,
    },

    /// Network failure or timeout
    #[error("transport error: {0}")]
    Transport(String),
}

impl BackendError {
    /// Missing resource
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Missing document
    pub fn document_not_found(doctype: &str, name: &str) -> Self {
        Self::not_found(DocKey::new(doctype, name).to_string())
    }

    /// Network failure
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Server validation failure without field detail
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::ValidationRejected {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// The same action may succeed if repeated
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Blocks a form from loading; no automatic retry is offered
    #[inline]
    #[must_use]
    pub fn is_fatal_to_form(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::PermissionDenied(_))
    }
}

/// Errors from document cache operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Requested status change is not allowed from the cached status
    #[error("cannot move {key} from {from} to {to}")]
    InvalidTransition {
        key: DocKey,
        from: DocStatus,
        to: DocStatus,
    },

    /// Backend confirmed a save without naming the record
    #[error("backend returned an unnamed {doctype} record")]
    UnnamedResult { doctype: String },
}

impl CacheError {
    /// Underlying backend failure, if any
    #[must_use]
    pub fn backend(&self) -> Option<&BackendError> {
        match self {
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }

    /// The same action may succeed if repeated
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.backend().is_some_and(BackendError::is_retryable)
    }
}
