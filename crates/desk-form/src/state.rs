//! Form lifecycle states and the transitions between them
//!
//! ```text
//! Loading ──► Ready ──► Submitting ──► Saved ──► Ready
//!    │          ▲            │
//!    ▼          │            ▼
//!  Failed       └──────  SaveFailed
//! ```
//!
//! `Ready`, `Saved` and `Failed` may go back to `Loading` on reload.

use crate::error::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a form treats the document it shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    /// New document
    #[default]
    Create,
    /// Existing document, editable
    Edit,
    /// Existing document, every field disabled
    View,
}

impl FormMode {
    /// Fields may not change
    #[inline]
    #[must_use]
    pub fn is_view_only(self) -> bool {
        self == Self::View
    }

    /// Loads an existing document when given a name
    #[inline]
    #[must_use]
    pub fn loads_document(self) -> bool {
        self != Self::Create
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::View => "view",
        }
    }
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    /// Descriptor or document is being fetched
    Loading,
    /// Accepting edits
    Ready,
    /// Save in flight
    Submitting,
    /// Last save succeeded
    Saved,
    /// Last save failed; passes straight back to `Ready`
    SaveFailed,
    /// Descriptor or document could not be loaded
    Failed,
}

impl FormState {
    /// Values may be edited
    #[inline]
    #[must_use]
    pub fn accepts_edits(self) -> bool {
        matches!(self, Self::Ready | Self::Saved)
    }

    /// Whether the form may move to `to`
    #[inline]
    #[must_use]
    pub fn can_transition_to(self, to: FormState) -> bool {
        allowed_transitions(self).contains(&to)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Submitting => "submitting",
            Self::Saved => "saved",
            Self::SaveFailed => "save_failed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// States reachable in one step from `from`
#[must_use]
pub fn allowed_transitions(from: FormState) -> &'static [FormState] {
    use FormState::*;
    match from {
        Loading => &[Ready, Failed],
        Ready => &[Submitting, Loading],
        Submitting => &[Saved, SaveFailed],
        Saved => &[Ready, Loading],
        SaveFailed => &[Ready],
        Failed => &[Loading],
    }
}

/// Check a transition
///
/// # Errors
/// `FormError::InvalidTransition` if `to` is not reachable from `from`
pub fn validate_transition(from: FormState, to: FormState) -> Result<(), FormError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(FormError::InvalidTransition { from, to })
    }
}
