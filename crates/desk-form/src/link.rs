//! Candidate lists for link fields

use desk_cache::{Backend, BackendError, LinkQuery};
use serde::{Deserialize, Serialize};

/// One selectable target of a link field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkOption {
    /// Target document name, stored as the field value
    pub value: String,
    pub label: String,
}

/// Loading state of a link field's candidates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LinkOptions {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<LinkOption>),
    /// Loading failed; the field still accepts typed values
    Failed(String),
}

impl LinkOptions {
    /// Loaded candidates, empty otherwise
    #[must_use]
    pub fn options(&self) -> &[LinkOption] {
        match self {
            Self::Loaded(options) => options,
            _ => &[],
        }
    }

    /// Message to show next to the field
    #[must_use]
    pub fn error(&self) -> Option<String> {
        match self {
            Self::Failed(reason) => Some(format!("Could not load options: {reason}")),
            _ => None,
        }
    }
}

/// Fetch up to `page_length` candidates of `target`
///
/// # Errors
/// The backend failure
pub async fn fetch_link_options(
    backend: &dyn Backend,
    target: &str,
    page_length: usize,
) -> Result<Vec<LinkOption>, BackendError> {
    let candidates = backend
        .search_link_targets(target, &LinkQuery::page(page_length))
        .await?;
    tracing::debug!(doctype = target, count = candidates.len(), "link options loaded");
    Ok(candidates
        .into_iter()
        .take(page_length)
        .map(|candidate| LinkOption {
            label: candidate.label().to_string(),
            value: candidate.name,
        })
        .collect())
}
