//! Field renderer dispatch
//!
//! [`Widget::for_field`] picks the input kind for a field type. The widget
//! turns a stored value into what the input shows ([`Widget::display`]) and
//! raw user input back into a field value ([`Widget::interpret`]). Types
//! without a dedicated widget fall back to a single-line text input.

use crate::datetime;
use desk_cache::FileUpload;
use desk_meta::value::is_truthy;
use desk_meta::{DocField, FieldType};
use serde_json::{Number, Value};

/// Highest value of a rating field
pub const MAX_RATING: u8 = 5;
/// Color shown when the field is empty
pub const DEFAULT_COLOR: &str = "#000000";

/// Input kind for a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// Single-line text
    Text { max_length: Option<usize> },
    /// Multi-line text
    TextArea { rows: u8 },
    Integer,
    /// Decimal number, with an optional adornment such as `%`
    Decimal { adornment: Option<&'static str> },
    Date,
    DateTime,
    Time,
    Checkbox,
    Select { choices: Vec<String> },
    /// Picker over documents of `target`
    Link { target: String },
    Password,
    /// File picker; the value is the uploaded file's URL
    Attachment { images_only: bool },
    Color,
    Rating { max: u8 },
    /// Value shown as text, never edited
    Display,
    /// Static markup from the field options
    Html { markup: String },
    /// Label only
    Heading,
}

/// Raw event from an input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Text(String),
    Checked(bool),
    Stars(u8),
    File(FileUpload),
}

/// What an input event means for the form
#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation {
    /// New field value
    Change(Value),
    /// A file to upload; its URL becomes the value
    Upload(FileUpload),
    /// Nothing changes
    Ignore,
}

/// Work a widget needs when it is first shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountEffect {
    /// Fetch candidate documents of a DocType
    LoadLinkOptions { target: String },
}

impl Widget {
    /// Widget for a field; `None` for layout markers
    #[must_use]
    pub fn for_field(field: &DocField) -> Option<Self> {
        let widget = match &field.fieldtype {
            FieldType::SectionBreak | FieldType::ColumnBreak | FieldType::TabBreak => {
                return None
            }
            FieldType::Text | FieldType::SmallText => Self::TextArea { rows: 3 },
            FieldType::LongText => Self::TextArea { rows: 6 },
            FieldType::Int => Self::Integer,
            FieldType::Float => Self::Decimal { adornment: None },
            FieldType::Currency => Self::Decimal {
                adornment: Some("$"),
            },
            FieldType::Percent => Self::Decimal {
                adornment: Some("%"),
            },
            FieldType::Date => Self::Date,
            FieldType::Datetime => Self::DateTime,
            FieldType::Time => Self::Time,
            FieldType::Check => Self::Checkbox,
            FieldType::Select => Self::Select {
                choices: field.select_choices(),
            },
            FieldType::Link => Self::Link {
                target: field.options.clone().unwrap_or_default().trim().to_string(),
            },
            FieldType::Password => Self::Password,
            FieldType::Attach => Self::Attachment { images_only: false },
            FieldType::AttachImage => Self::Attachment { images_only: true },
            FieldType::Color => Self::Color,
            FieldType::Rating => Self::Rating { max: MAX_RATING },
            FieldType::ReadOnly | FieldType::Button => Self::Display,
            FieldType::Html => Self::Html {
                markup: field.options.clone().unwrap_or_default(),
            },
            FieldType::Heading => Self::Heading,
            FieldType::Data
            | FieldType::HtmlEditor
            | FieldType::DynamicLink
            | FieldType::Table
            | FieldType::Code
            | FieldType::TextEditor
            | FieldType::Signature
            | FieldType::Barcode
            | FieldType::Geolocation
            | FieldType::Duration
            | FieldType::TableMultiSelect
            | FieldType::Autocomplete
            | FieldType::Other(_) => Self::Text {
                max_length: field.length,
            },
        };
        Some(widget)
    }

    /// Whether user input can change the value
    #[must_use]
    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Display | Self::Html { .. } | Self::Heading)
    }

    /// Spans the full form width
    #[must_use]
    pub fn is_full_width(&self) -> bool {
        matches!(
            self,
            Self::TextArea { rows: 6.. } | Self::Html { .. } | Self::Heading
        )
    }

    /// Work to start when the widget is shown
    #[must_use]
    pub fn mount_effect(&self) -> Option<MountEffect> {
        match self {
            Self::Link { target } if !target.is_empty() => Some(MountEffect::LoadLinkOptions {
                target: target.clone(),
            }),
            _ => None,
        }
    }

    /// Text the input shows for a stored value
    #[must_use]
    pub fn display(&self, value: &Value) -> String {
        let text = plain_text(value);
        match self {
            Self::Date => datetime::date_to_picker(&text).unwrap_or_default(),
            Self::DateTime => datetime::datetime_to_picker(&text).unwrap_or_default(),
            Self::Time => datetime::time_to_picker(&text).unwrap_or_default(),
            Self::Checkbox => is_truthy(value).to_string(),
            Self::Color if text.is_empty() => DEFAULT_COLOR.to_string(),
            Self::Rating { max } => {
                let stars = value.as_f64().unwrap_or(0.0).clamp(0.0, f64::from(*max));
                format!("{stars}/{max}")
            }
            Self::Html { markup } => markup.clone(),
            Self::Heading => String::new(),
            _ => text,
        }
    }

    /// Value produced by a raw input event
    #[must_use]
    pub fn interpret(&self, input: RawInput) -> Interpretation {
        match (self, input) {
            (Self::Display | Self::Html { .. } | Self::Heading, _) => Interpretation::Ignore,
            (Self::Integer, RawInput::Text(text)) => Interpretation::Change(parse_int(&text)),
            (Self::Decimal { .. }, RawInput::Text(text)) => {
                Interpretation::Change(parse_float(&text))
            }
            (Self::Date, RawInput::Text(text)) => {
                Interpretation::Change(Value::String(convert_or_keep(text, datetime::date_from_picker)))
            }
            (Self::DateTime, RawInput::Text(text)) => Interpretation::Change(Value::String(
                convert_or_keep(text, datetime::datetime_from_picker),
            )),
            (Self::Time, RawInput::Text(text)) => {
                Interpretation::Change(Value::String(convert_or_keep(text, datetime::time_from_picker)))
            }
            (Self::Checkbox, RawInput::Checked(checked)) => {
                Interpretation::Change(Value::Bool(checked))
            }
            (Self::Rating { max }, RawInput::Stars(stars)) => {
                Interpretation::Change(Value::from(stars.min(*max)))
            }
            (Self::Attachment { .. }, RawInput::File(file)) => Interpretation::Upload(file),
            (Self::Attachment { .. }, RawInput::Text(text)) if text.is_empty() => {
                Interpretation::Change(Value::String(text))
            }
            (
                Self::Text { .. }
                | Self::TextArea { .. }
                | Self::Select { .. }
                | Self::Link { .. }
                | Self::Password
                | Self::Color,
                RawInput::Text(text),
            ) => Interpretation::Change(Value::String(text)),
            _ => Interpretation::Ignore,
        }
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn convert_or_keep(text: String, convert: fn(&str) -> Option<String>) -> String {
    if text.is_empty() {
        return text;
    }
    convert(&text).unwrap_or(text)
}

/// Integer from input text; unparseable or out-of-range input is `0`
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn parse_int(text: &str) -> Value {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    const LOWER: f64 = i64::MIN as f64;
    const UPPER: f64 = i64::MAX as f64;

    let text = text.trim();
    text.parse::<i64>()
        .ok()
        .or_else(|| {
            text.parse::<f64>()
                .ok()
                .map(f64::trunc)
                .filter(|f| (LOWER..UPPER).contains(f))
                .map(|f| f as i64)
        })
        .map_or_else(|| Value::from(0), Value::from)
}

/// Decimal from input text; unparseable input is `0`
fn parse_float(text: &str) -> Value {
    text.trim()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or_else(|| Value::from(0), Value::Number)
}

/// A field prepared for display
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField {
    pub fieldname: String,
    pub label: String,
    pub description: Option<String>,
    pub required: bool,
    /// Input events are ignored
    pub disabled: bool,
    pub widget: Widget,
    /// Text the input shows
    pub display: String,
    /// Validation or side-effect error for this field
    pub error: Option<String>,
}

impl RenderedField {
    /// Interpret an input event, honoring `disabled`
    #[must_use]
    pub fn interpret(&self, input: RawInput) -> Interpretation {
        if self.disabled {
            Interpretation::Ignore
        } else {
            self.widget.interpret(input)
        }
    }

    /// Interpret an input event and report a value change to `on_change`
    ///
    /// Returns the file to upload for attachment fields; the caller stores
    /// the uploaded file's URL through `on_change` once it has one.
    pub fn handle(&self, input: RawInput, on_change: impl FnOnce(Value)) -> Option<FileUpload> {
        match self.interpret(input) {
            Interpretation::Change(value) => {
                on_change(value);
                None
            }
            Interpretation::Upload(file) => Some(file),
            Interpretation::Ignore => None,
        }
    }
}

/// Prepare a field for display; `None` for layout markers
///
/// `view_only` disables every field; read-only fields are always disabled.
#[must_use]
pub fn render(field: &DocField, value: &Value, view_only: bool) -> Option<RenderedField> {
    let widget = Widget::for_field(field)?;
    Some(RenderedField {
        fieldname: field.fieldname.clone(),
        label: field.display_label().to_string(),
        description: field.description.clone(),
        required: field.reqd && !field.read_only,
        disabled: view_only || field.read_only || !widget.is_editable(),
        display: widget.display(value),
        widget,
        error: None,
    })
}
