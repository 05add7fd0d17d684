//! Form engine configuration

use serde::{Deserialize, Serialize};

/// Page size for link-field candidate lists
pub const DEFAULT_LINK_PAGE_LENGTH: usize = 50;

/// Form engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Maximum candidates fetched per link field
    pub link_page_length: usize,
    /// Re-validate a field as soon as its value changes
    pub validate_on_change: bool,
    /// Fetch link-field candidates when a form becomes ready
    pub load_link_options: bool,
}

impl FormConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With link page length
    #[inline]
    #[must_use]
    pub fn with_link_page_length(mut self, page_length: usize) -> Self {
        self.link_page_length = page_length;
        self
    }

    /// With change-time validation switched on or off
    #[inline]
    #[must_use]
    pub fn with_validate_on_change(mut self, enabled: bool) -> Self {
        self.validate_on_change = enabled;
        self
    }

    /// With link option loading switched on or off
    #[inline]
    #[must_use]
    pub fn with_link_options(mut self, enabled: bool) -> Self {
        self.load_link_options = enabled;
        self
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            link_page_length: DEFAULT_LINK_PAGE_LENGTH,
            validate_on_change: true,
            load_link_options: true,
        }
    }
}
