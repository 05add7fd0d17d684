//! Field visibility
//!
//! A field is shown unless it is hidden or its `depends_on` condition is
//! not met. Conditions are of the form `eval:<fieldname>` (optionally
//! `eval:doc.<fieldname>`, or a bare fieldname) and hold when the named
//! value is truthy. Other expressions are not evaluated; fields guarded by
//! them stay hidden.

use desk_meta::value::is_truthy;
use desk_meta::DocField;
use serde_json::{Map, Value};

/// Parsed `depends_on` expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// No condition
    Always,
    /// Holds when the named field's value is truthy
    FieldTruthy(String),
    /// Expression that is not evaluated
    Unsupported(String),
}

impl Condition {
    #[must_use]
    pub fn parse(expr: Option<&str>) -> Self {
        let Some(raw) = expr.map(str::trim).filter(|e| !e.is_empty()) else {
            return Self::Always;
        };
        let body = raw.strip_prefix("eval:").unwrap_or(raw).trim();
        let body = body.strip_prefix("doc.").unwrap_or(body);

        if is_identifier(body) {
            Self::FieldTruthy(body.to_string())
        } else {
            Self::Unsupported(raw.to_string())
        }
    }

    #[must_use]
    pub fn evaluate(&self, values: &Map<String, Value>) -> bool {
        match self {
            Self::Always => true,
            Self::FieldTruthy(fieldname) => values.get(fieldname).is_some_and(is_truthy),
            Self::Unsupported(expr) => {
                tracing::trace!(expr = %expr, "condition not evaluated, field hidden");
                false
            }
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether a field is shown for the current values
#[must_use]
pub fn is_visible(field: &DocField, values: &Map<String, Value>) -> bool {
    !field.hidden && Condition::parse(field.depends_on.as_deref()).evaluate(values)
}
