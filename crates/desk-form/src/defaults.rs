//! Initial form values
//!
//! Each value-bearing field starts from, in order: the document's stored
//! value (when editing or viewing), the descriptor default coerced to the
//! field's type, or the type's zero value.

use desk_meta::{DocField, DocType, Document, FieldType};
use serde_json::{Map, Number, Value};

/// Initial values for every value-bearing field of `doctype`
///
/// Fields the document does not carry fall back to their default. Keys
/// outside the descriptor are not included.
#[must_use]
pub fn initial_values(doctype: &DocType, document: Option<&Document>) -> Map<String, Value> {
    doctype
        .value_fields()
        .map(|field| {
            let value = document
                .and_then(|doc| doc.get(&field.fieldname))
                .cloned()
                .unwrap_or_else(|| field_default(field));
            (field.fieldname.clone(), value)
        })
        .collect()
}

/// Starting value of a field in a new document
#[must_use]
pub fn field_default(field: &DocField) -> Value {
    match &field.default {
        Some(default) if !default.is_null() => coerce(&field.fieldtype, default),
        _ => field.fieldtype.zero_value(),
    }
}

/// Convert a descriptor default to the field's value type
///
/// Descriptors carry defaults as strings (`"1"` for a checked box, `"0.5"`
/// for a rate). Values that do not convert are kept as they are.
#[must_use]
pub fn coerce(fieldtype: &FieldType, default: &Value) -> Value {
    match (fieldtype, default) {
        (FieldType::Check, Value::String(s)) => {
            Value::Bool(matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true"))
        }
        (FieldType::Check, Value::Number(n)) => Value::Bool(n.as_f64().is_some_and(|f| f != 0.0)),
        (FieldType::Int, Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_or_else(|_| default.clone(), Value::from),
        (ty, Value::String(s)) if ty.is_numeric() => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map_or_else(|| default.clone(), Value::Number),
        _ => default.clone(),
    }
}
