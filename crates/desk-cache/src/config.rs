//! Cache configuration

use serde::{Deserialize, Serialize};

/// Cache sizing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached DocType descriptors; `None` keeps every
    /// descriptor until an explicit clear
    pub metadata_capacity: Option<u64>,
}

impl CacheConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With metadata capacity bound
    #[inline]
    #[must_use]
    pub fn with_metadata_capacity(mut self, capacity: u64) -> Self {
        self.metadata_capacity = Some(capacity);
        self
    }
}
