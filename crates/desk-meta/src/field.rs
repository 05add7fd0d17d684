//! Field descriptors
//!
//! A [`DocField`] describes one field of a DocType: its key, label,
//! [`FieldType`], flags and optional validation constraints.

use crate::de::flag;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Declared type of a field
///
/// Closed over the field types the server knows about. Names the client
/// has never seen are kept verbatim in [`FieldType::Other`] and treated as
/// single-line text by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Data,
    Text,
    LongText,
    HtmlEditor,
    Int,
    Float,
    Currency,
    Percent,
    Date,
    Datetime,
    Time,
    Select,
    Link,
    DynamicLink,
    Table,
    Check,
    SmallText,
    Code,
    TextEditor,
    Attach,
    AttachImage,
    Signature,
    Color,
    Barcode,
    Geolocation,
    Duration,
    Rating,
    Password,
    ReadOnly,
    Heading,
    SectionBreak,
    ColumnBreak,
    TabBreak,
    Html,
    Button,
    TableMultiSelect,
    Autocomplete,
    /// Field type name not known to this client
    Other(String),
}

impl FieldType {
    /// Wire name of the field type
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Data => "Data",
            Self::Text => "Text",
            Self::LongText => "Long Text",
            Self::HtmlEditor => "HTML Editor",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Currency => "Currency",
            Self::Percent => "Percent",
            Self::Date => "Date",
            Self::Datetime => "Datetime",
            Self::Time => "Time",
            Self::Select => "Select",
            Self::Link => "Link",
            Self::DynamicLink => "Dynamic Link",
            Self::Table => "Table",
            Self::Check => "Check",
            Self::SmallText => "Small Text",
            Self::Code => "Code",
            Self::TextEditor => "Text Editor",
            Self::Attach => "Attach",
            Self::AttachImage => "Attach Image",
            Self::Signature => "Signature",
            Self::Color => "Color",
            Self::Barcode => "Barcode",
            Self::Geolocation => "Geolocation",
            Self::Duration => "Duration",
            Self::Rating => "Rating",
            Self::Password => "Password",
            Self::ReadOnly => "Read Only",
            Self::Heading => "Heading",
            Self::SectionBreak => "Section Break",
            Self::ColumnBreak => "Column Break",
            Self::TabBreak => "Tab Break",
            Self::Html => "HTML",
            Self::Button => "Button",
            Self::TableMultiSelect => "Table MultiSelect",
            Self::Autocomplete => "Autocomplete",
            Self::Other(name) => name,
        }
    }

    /// Section, column and tab breaks
    ///
    /// Layout markers never carry a value: they are skipped by validation,
    /// default computation and data binding.
    #[inline]
    #[must_use]
    pub fn is_layout_marker(&self) -> bool {
        matches!(self, Self::SectionBreak | Self::ColumnBreak | Self::TabBreak)
    }

    /// Int, Float, Currency and Percent
    #[inline]
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Currency | Self::Percent)
    }

    /// Plain text types that accept length and pattern constraints
    #[inline]
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::Data | Self::SmallText | Self::Text | Self::LongText
        )
    }

    /// Date and Datetime
    #[inline]
    #[must_use]
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date | Self::Datetime)
    }

    /// Types that only display content and never produce a value
    #[inline]
    #[must_use]
    pub fn is_display_only(&self) -> bool {
        matches!(self, Self::ReadOnly | Self::Html | Self::Heading | Self::Button)
    }

    /// Value a fresh field of this type starts with
    #[must_use]
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Check => Value::Bool(false),
            t if t.is_numeric() => Value::from(0),
            _ => Value::String(String::new()),
        }
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        match name {
            "Data" => Self::Data,
            "Text" => Self::Text,
            "Long Text" => Self::LongText,
            "HTML Editor" => Self::HtmlEditor,
            "Int" => Self::Int,
            "Float" => Self::Float,
            "Currency" => Self::Currency,
            "Percent" => Self::Percent,
            "Date" => Self::Date,
            "Datetime" => Self::Datetime,
            "Time" => Self::Time,
            "Select" => Self::Select,
            "Link" => Self::Link,
            "Dynamic Link" => Self::DynamicLink,
            "Table" => Self::Table,
            "Check" => Self::Check,
            "Small Text" => Self::SmallText,
            "Code" => Self::Code,
            "Text Editor" => Self::TextEditor,
            "Attach" => Self::Attach,
            "Attach Image" => Self::AttachImage,
            "Signature" => Self::Signature,
            "Color" => Self::Color,
            "Barcode" => Self::Barcode,
            "Geolocation" => Self::Geolocation,
            "Duration" => Self::Duration,
            "Rating" => Self::Rating,
            "Password" => Self::Password,
            "Read Only" => Self::ReadOnly,
            "Heading" => Self::Heading,
            "Section Break" => Self::SectionBreak,
            "Column Break" => Self::ColumnBreak,
            "Tab Break" => Self::TabBreak,
            "HTML" => Self::Html,
            "Button" => Self::Button,
            "Table MultiSelect" => Self::TableMultiSelect,
            "Autocomplete" => Self::Autocomplete,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<FieldType> for String {
    fn from(ty: FieldType) -> Self {
        match ty {
            FieldType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional value constraints attached to a field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldValidation {
    /// Server-side expression; carried but not evaluated client-side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    /// Custom message for `expression` failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regular expression the whole value must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Metadata for one field of a DocType
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocField {
    /// Key of the field within its DocType
    pub fieldname: String,
    #[serde(default)]
    pub label: String,
    pub fieldtype: FieldType,
    /// Choices for Select, target DocType for Link, markup for HTML
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub reqd: bool,
    #[serde(default, deserialize_with = "flag")]
    pub read_only: bool,
    #[serde(default, deserialize_with = "flag")]
    pub hidden: bool,
    /// Visibility condition, e.g. `eval:enable_flag`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandatory_depends_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only_depends_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub in_list_view: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u8>,
    /// Maximum input length hint for text inputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

impl DocField {
    /// Create field with defaults for everything but key, label and type
    #[must_use]
    pub fn new(
        fieldname: impl Into<String>,
        label: impl Into<String>,
        fieldtype: FieldType,
    ) -> Self {
        Self {
            fieldname: fieldname.into(),
            label: label.into(),
            fieldtype,
            options: None,
            reqd: false,
            read_only: false,
            hidden: false,
            depends_on: None,
            mandatory_depends_on: None,
            read_only_depends_on: None,
            default: None,
            description: None,
            in_list_view: false,
            precision: None,
            length: None,
            fetch_from: None,
            validation: None,
        }
    }

    /// Mark as required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.reqd = true;
        self
    }

    /// Mark as read-only
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Mark as hidden
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// With options string
    #[must_use]
    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }

    /// With default value
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// With visibility condition
    #[must_use]
    pub fn with_depends_on(mut self, expr: impl Into<String>) -> Self {
        self.depends_on = Some(expr.into());
        self
    }

    /// With validation constraints
    #[must_use]
    pub fn with_validation(mut self, validation: FieldValidation) -> Self {
        self.validation = Some(validation);
        self
    }

    /// With description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the field binds to a document value
    #[inline]
    #[must_use]
    pub fn holds_value(&self) -> bool {
        !self.fieldtype.is_layout_marker()
    }

    /// Label, falling back to the fieldname when unlabeled
    #[must_use]
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.fieldname
        } else {
            &self.label
        }
    }

    /// Non-empty choices of a Select field, trimmed
    #[must_use]
    pub fn select_choices(&self) -> Vec<String> {
        self.options
            .as_deref()
            .unwrap_or_default()
            .split('\n')
            .map(str::trim)
            .filter(|choice| !choice.is_empty())
            .map(str::to_string)
            .collect()
    }
}
