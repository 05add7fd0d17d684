//! Command implementations
//!
//! Each command returns its output instead of printing so it can be tested
//! against fixtures.

use anyhow::Context;
use desk_form::{defaults, layout, visibility, FieldErrors, FormContext, FormController, FormMode};
use desk_form::{ValidationSchema, Widget};
use serde_json::{Map, Value};
use std::fmt::Write as _;

/// Sections and fields of a DocType, one line per field
///
/// Fields hidden for a new document are flagged `hidden`.
///
/// # Errors
/// The descriptor cannot be loaded
pub async fn layout(ctx: &FormContext, doctype: &str) -> anyhow::Result<String> {
    let descriptor = ctx
        .metadata
        .get(doctype)
        .await
        .with_context(|| format!("loading {doctype}"))?;
    let values = defaults::initial_values(&descriptor, None);

    let mut out = String::new();
    writeln!(out, "{}", descriptor.display_label())?;
    for section in layout::group(&descriptor.fields) {
        writeln!(out, "[{}]", section.label)?;
        for field in section.fields {
            let mut flags = Vec::new();
            if field.reqd && !field.read_only {
                flags.push("required");
            }
            if field.read_only {
                flags.push("read-only");
            }
            if !visibility::is_visible(field, &values) {
                flags.push("hidden");
            }
            if Widget::for_field(field).is_some_and(|widget| widget.mount_effect().is_some()) {
                flags.push("link");
            }

            write!(
                out,
                "  {} ({}) {}",
                field.fieldname,
                field.fieldtype,
                field.display_label()
            )?;
            if !flags.is_empty() {
                write!(out, " [{}]", flags.join(", "))?;
            }
            writeln!(out)?;
        }
    }
    Ok(out)
}

/// Initial draft of a new form, or of the named document
///
/// # Errors
/// The descriptor or document cannot be loaded
pub async fn defaults(
    ctx: &FormContext,
    doctype: &str,
    docname: Option<&str>,
) -> anyhow::Result<Value> {
    let mode = if docname.is_some() {
        FormMode::View
    } else {
        FormMode::Create
    };
    let form = FormController::open(ctx.clone(), doctype, docname, mode)
        .await
        .with_context(|| format!("opening {doctype} form"))?;
    let values = Value::Object(form.values().clone());
    form.dispose();
    Ok(values)
}

/// Validate a value map as a new document would be validated on save
///
/// Fields missing from `values` take their defaults first.
///
/// # Errors
/// The descriptor cannot be loaded
pub async fn validate(
    ctx: &FormContext,
    doctype: &str,
    values: Map<String, Value>,
) -> anyhow::Result<Result<(), FieldErrors>> {
    let descriptor = ctx
        .metadata
        .get(doctype)
        .await
        .with_context(|| format!("loading {doctype}"))?;
    let schema = ValidationSchema::compile(&descriptor);

    let mut draft = defaults::initial_values(&descriptor, None);
    draft.extend(values);
    Ok(schema.validate(&draft))
}

/// One line per field error
#[must_use]
pub fn format_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(fieldname, message)| format!("{fieldname}: {message}\n"))
        .collect()
}
