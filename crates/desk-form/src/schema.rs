//! Validation schema compiled from field metadata
//!
//! One [`FieldRule`] per value-bearing field, in descriptor order. A field
//! is required when it is marked `reqd` and is not read-only; every other
//! constraint applies only to non-blank values.

use crate::datetime;
use crate::error::FieldErrors;
use desk_meta::value::is_blank;
use desk_meta::{DocField, DocType, FieldType};
use regex::Regex;
use serde_json::{Map, Value};

/// Type constraint for one field
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Int, Float, Currency, Percent
    Number { min: Option<f64>, max: Option<f64> },
    /// Plain text types
    Text {
        min_len: Option<usize>,
        max_len: Option<usize>,
        pattern: Option<Regex>,
    },
    /// Date or Datetime
    Date,
    Time,
    /// Check
    Boolean,
    /// Select or Link; the server decides which values are legal
    Choice,
    /// No type constraint
    Any,
}

/// Compiled rule for one field
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub fieldname: String,
    pub label: String,
    pub required: bool,
    pub kind: RuleKind,
}

impl FieldRule {
    /// Compile the rule for a field; `None` for layout markers
    #[must_use]
    pub fn compile(field: &DocField) -> Option<Self> {
        if !field.holds_value() {
            return None;
        }
        let validation = field.validation.clone().unwrap_or_default();

        let kind = match &field.fieldtype {
            ty if ty.is_numeric() => RuleKind::Number {
                min: validation.min_value,
                max: validation.max_value,
            },
            ty if ty.is_text() => RuleKind::Text {
                min_len: validation.min_length,
                max_len: validation.max_length.or(field.length),
                pattern: validation
                    .pattern
                    .as_deref()
                    .and_then(|pattern| compile_pattern(&field.fieldname, pattern)),
            },
            ty if ty.is_date() => RuleKind::Date,
            FieldType::Time => RuleKind::Time,
            FieldType::Check => RuleKind::Boolean,
            FieldType::Select | FieldType::Link => RuleKind::Choice,
            _ => RuleKind::Any,
        };

        Some(Self {
            fieldname: field.fieldname.clone(),
            label: field.display_label().to_string(),
            required: field.reqd && !field.read_only,
            kind,
        })
    }

    /// Check one value
    ///
    /// # Errors
    /// The user-facing message for the first constraint that fails
    pub fn check(&self, value: &Value) -> Result<(), String> {
        let label = &self.label;
        if is_blank(value) {
            return if self.required {
                Err(format!("{label} is required"))
            } else {
                Ok(())
            };
        }

        match &self.kind {
            RuleKind::Number { min, max } => {
                let number = as_number(value).ok_or_else(|| format!("{label} must be a number"))?;
                if let Some(min) = min.filter(|min| number < *min) {
                    return Err(format!("{label} must be at least {min}"));
                }
                if let Some(max) = max.filter(|max| number > *max) {
                    return Err(format!("{label} must be at most {max}"));
                }
            }
            RuleKind::Text {
                min_len,
                max_len,
                pattern,
            } => {
                let text = as_text(value).ok_or_else(|| format!("{label} must be text"))?;
                let len = text.chars().count();
                if let Some(min) = min_len.filter(|min| len < *min) {
                    return Err(format!("{label} must be at least {min} characters"));
                }
                if let Some(max) = max_len.filter(|max| len > *max) {
                    return Err(format!("{label} must be at most {max} characters"));
                }
                if pattern.as_ref().is_some_and(|re| !re.is_match(&text)) {
                    return Err(format!("{label} is not in the expected format"));
                }
            }
            RuleKind::Date => {
                if value.as_str().and_then(datetime::parse_datetime).is_none() {
                    return Err(format!("{label} must be a valid date"));
                }
            }
            RuleKind::Time => {
                if value.as_str().and_then(datetime::parse_time).is_none() {
                    return Err(format!("{label} must be a valid time"));
                }
            }
            RuleKind::Boolean => {
                let ok = match value {
                    Value::Bool(_) => true,
                    Value::Number(n) => matches!(n.as_i64(), Some(0 | 1)),
                    _ => false,
                };
                if !ok {
                    return Err(format!("{label} must be checked or unchecked"));
                }
            }
            RuleKind::Choice => {
                if as_text(value).is_none() {
                    return Err(format!("{label} must be text"));
                }
            }
            RuleKind::Any => {}
        }
        Ok(())
    }
}

/// Whole-form validation schema
#[derive(Debug, Clone, Default)]
pub struct ValidationSchema {
    rules: Vec<FieldRule>,
}

impl ValidationSchema {
    /// Compile rules for every value-bearing field of a DocType
    #[must_use]
    pub fn compile(doctype: &DocType) -> Self {
        Self::from_fields(&doctype.fields)
    }

    /// Compile rules for a field list
    #[must_use]
    pub fn from_fields(fields: &[DocField]) -> Self {
        Self {
            rules: fields.iter().filter_map(FieldRule::compile).collect(),
        }
    }

    #[must_use]
    pub fn rule(&self, fieldname: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.fieldname == fieldname)
    }

    pub fn rules(&self) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter()
    }

    /// Names of required fields, in order
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|rule| rule.required)
            .map(|rule| rule.fieldname.as_str())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check one field; fields without a rule always pass
    ///
    /// # Errors
    /// The message for the failing constraint
    pub fn validate_field(&self, fieldname: &str, value: &Value) -> Result<(), String> {
        self.rule(fieldname).map_or(Ok(()), |rule| rule.check(value))
    }

    /// Check every rule against a value map; missing values count as blank
    ///
    /// # Errors
    /// Every failing field with its message
    pub fn validate(&self, values: &Map<String, Value>) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for rule in &self.rules {
            let value = values.get(&rule.fieldname).unwrap_or(&Value::Null);
            if let Err(message) = rule.check(value) {
                errors.insert(rule.fieldname.clone(), message);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Compile a field pattern matched against the whole value
///
/// Anchors the pattern itself carries are kept; wrapping them again is
/// harmless, so a pattern anchored at one end still has to cover the value.
fn compile_pattern(fieldname: &str, pattern: &str) -> Option<Regex> {
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::warn!(fieldname, pattern, error = %err, "ignoring invalid field pattern");
            None
        }
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
