//! Error types for the form engine

use crate::state::FormState;
use desk_cache::{BackendError, CacheError, FieldRejection};
use indexmap::IndexMap;
use std::fmt;

/// Validation messages keyed by fieldname, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(IndexMap<String, String>);

impl FieldErrors {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message, replacing any previous one for the field
    pub fn insert(&mut self, fieldname: impl Into<String>, message: impl Into<String>) {
        self.0.insert(fieldname.into(), message.into());
    }

    /// Drop the message for a field
    pub fn remove(&mut self, fieldname: &str) -> Option<String> {
        self.0.shift_remove(fieldname)
    }

    #[must_use]
    pub fn get(&self, fieldname: &str) -> Option<&str> {
        self.0.get(fieldname).map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// `(fieldname, message)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<&[FieldRejection]> for FieldErrors {
    fn from(rejections: &[FieldRejection]) -> Self {
        let mut errors = Self::new();
        for rejection in rejections {
            errors.insert(rejection.fieldname.clone(), rejection.message.clone());
        }
        errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.0.values().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
        }
        Ok(())
    }
}

/// Errors from form operations
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// DocType descriptor could not be loaded
    #[error("failed to load metadata for {doctype}: {source}")]
    Metadata {
        doctype: String,
        source: BackendError,
    },

    /// Document could not be loaded
    #[error("failed to load document: {0}")]
    Document(#[source] CacheError),

    /// Draft values failed validation
    #[error("validation failed: {0}")]
    Invalid(FieldErrors),

    /// Server refused or failed to store the draft
    #[error("save failed: {0}")]
    Save(#[source] CacheError),

    /// Submit, cancel or delete of a saved document failed
    #[error("{action} failed: {source}")]
    Lifecycle {
        action: &'static str,
        source: CacheError,
    },

    /// File upload for an attachment field failed
    #[error("upload for {fieldname} failed: {source}")]
    Upload {
        fieldname: String,
        source: BackendError,
    },

    /// Operation needs a form in a different state
    #[error("form is {state}")]
    NotReady { state: FormState },

    /// Form was opened in view mode, or the field does not take input
    #[error("form is read-only")]
    ReadOnly,

    /// No value-bearing field with this name
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Operation needs a saved document
    #[error("no saved document")]
    NoDocument,

    #[error("invalid form state transition: {from} -> {to}")]
    InvalidTransition { from: FormState, to: FormState },
}

impl FormError {
    /// Not ready error
    #[inline]
    pub fn not_ready(state: FormState) -> Self {
        Self::NotReady { state }
    }

    /// Repeating the operation may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Metadata { source, .. } | Self::Upload { source, .. } => source.is_retryable(),
            Self::Document(err) | Self::Save(err) | Self::Lifecycle { source: err, .. } => {
                err.is_retryable()
            }
            _ => false,
        }
    }

    /// Validation messages, for `Invalid` errors
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_display_in_order() {
        let mut errors = FieldErrors::new();
        errors.insert("title", "Title is required");
        errors.insert("qty", "Qty must be a number");
        assert_eq!(errors.to_string(), "Title is required; Qty must be a number");

        errors.remove("title");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("qty"), Some("Qty must be a number"));
    }

    #[test]
    fn rejections_become_field_errors() {
        let rejections = vec![FieldRejection {
            fieldname: "email".to_string(),
            message: "Email already exists".to_string(),
        }];
        let errors = FieldErrors::from(rejections.as_slice());
        assert_eq!(errors.get("email"), Some("Email already exists"));
    }

    #[test]
    fn error_display() {
        let err = FormError::Save(CacheError::from(BackendError::transport("timed out")));
        assert_eq!(err.to_string(), "save failed: transport error: timed out");
        assert!(err.is_retryable());

        assert_eq!(
            FormError::not_ready(FormState::Submitting).to_string(),
            "form is submitting"
        );
        assert!(!FormError::ReadOnly.is_retryable());
    }
}
