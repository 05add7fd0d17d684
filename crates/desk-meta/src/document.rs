//! Document records
//!
//! A [`Document`] is one record of a DocType: identifier, status code and an
//! open map of field values keyed by fieldname.

use crate::error::MetaError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Lifecycle status of a document (`docstatus` on the wire)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DocStatus {
    /// Editable
    #[default]
    Draft = 0,
    /// Immutable except for cancellation
    Submitted = 1,
    Cancelled = 2,
}

impl DocStatus {
    /// Numeric status code
    #[inline]
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Human-readable label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether a document in this status may move to `to`
    #[must_use]
    pub fn can_transition_to(self, to: DocStatus) -> bool {
        matches!(
            (self, to),
            (Self::Draft, Self::Submitted) | (Self::Draft | Self::Submitted, Self::Cancelled)
        )
    }
}

impl TryFrom<u8> for DocStatus {
    type Error = MetaError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Draft),
            1 => Ok(Self::Submitted),
            2 => Ok(Self::Cancelled),
            other => Err(MetaError::InvalidDocStatus(other)),
        }
    }
}

impl From<DocStatus> for u8 {
    fn from(status: DocStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for DocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cache key of a named document: `doctype:name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocKey {
    pub doctype: String,
    pub name: String,
}

impl DocKey {
    #[inline]
    #[must_use]
    pub fn new(doctype: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            doctype: doctype.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.doctype, self.name)
    }
}

/// One record of a DocType
///
/// `name` is absent until the first save. Server bookkeeping such as
/// `owner` and `modified` rides along in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub doctype: String,
    #[serde(default)]
    pub docstatus: DocStatus,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Unsaved draft document
    #[must_use]
    pub fn new(doctype: impl Into<String>) -> Self {
        Self {
            name: None,
            doctype: doctype.into(),
            docstatus: DocStatus::Draft,
            fields: Map::new(),
        }
    }

    /// With name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// With field values
    #[must_use]
    pub fn with_fields(mut self, fields: Map<String, Value>) -> Self {
        self.fields = fields;
        self
    }

    /// With a single field value
    #[must_use]
    pub fn with_field(mut self, fieldname: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(fieldname.into(), value.into());
        self
    }

    /// Cache key, if the document has been named
    #[must_use]
    pub fn key(&self) -> Option<DocKey> {
        self.name
            .as_ref()
            .map(|name| DocKey::new(self.doctype.clone(), name.clone()))
    }

    /// Value of a field
    #[inline]
    #[must_use]
    pub fn get(&self, fieldname: &str) -> Option<&Value> {
        self.fields.get(fieldname)
    }

    /// Set a field value, returning the previous one
    pub fn set(&mut self, fieldname: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(fieldname.into(), value.into())
    }

    /// Whether the document can still be edited
    #[inline]
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.docstatus == DocStatus::Draft
    }
}
