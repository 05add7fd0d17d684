//! DocType descriptors
//!
//! A [`DocType`] is the remote definition of one document shape. It is
//! immutable once fetched; field order is preserved exactly as received
//! because it drives layout section membership.

use crate::de::flag;
use crate::field::DocField;
use serde::{Deserialize, Serialize};

/// Sort direction for list views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Descriptor of one document shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocType {
    pub name: String,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered field list; order is load-bearing
    #[serde(default)]
    pub fields: Vec<DocField>,
    #[serde(default, deserialize_with = "flag")]
    pub is_submittable: bool,
    #[serde(default, deserialize_with = "flag")]
    pub is_single: bool,
    #[serde(default, deserialize_with = "flag")]
    pub is_tree: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl DocType {
    /// Create descriptor with the given fields
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<DocField>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            module: String::new(),
            description: None,
            fields,
            is_submittable: false,
            is_single: false,
            is_tree: false,
            title_field: None,
            sort_field: None,
            sort_order: SortOrder::default(),
        }
    }

    /// With display label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Mark as submittable
    #[must_use]
    pub fn submittable(mut self) -> Self {
        self.is_submittable = true;
        self
    }

    /// Look up a field by name
    #[must_use]
    pub fn field(&self, fieldname: &str) -> Option<&DocField> {
        self.fields.iter().find(|f| f.fieldname == fieldname)
    }

    /// Fields that bind to document values, in declaration order
    pub fn value_fields(&self) -> impl Iterator<Item = &DocField> {
        self.fields.iter().filter(|f| f.holds_value())
    }

    /// Label, falling back to the DocType name
    #[must_use]
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }
}
