//! Section grouping of a DocType's field list
//!
//! Fields are grouped at Section Breaks. Fields before the first break go
//! to a leading section labeled "Main"; an unlabeled break starts a section
//! labeled "Section". Column and Tab Breaks are dropped, and a section
//! with no fields is never emitted.

use desk_meta::{DocField, FieldType};

/// Label of the implicit first section
pub const MAIN_SECTION: &str = "Main";
/// Label for a Section Break without one
pub const UNLABELED_SECTION: &str = "Section";

/// A labeled run of fields
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    pub label: String,
    pub fields: Vec<&'a DocField>,
}

impl<'a> Section<'a> {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn fieldnames(&self) -> Vec<&'a str> {
        self.fields.iter().map(|field| field.fieldname.as_str()).collect()
    }
}

/// Group fields into sections, preserving order
#[must_use]
pub fn group(fields: &[DocField]) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut current = Section::new(MAIN_SECTION);
    for field in fields {
        match field.fieldtype {
            FieldType::SectionBreak => {
                let label = if field.label.trim().is_empty() {
                    UNLABELED_SECTION
                } else {
                    field.label.as_str()
                };
                let closed = std::mem::replace(&mut current, Section::new(label));
                if !closed.fields.is_empty() {
                    sections.push(closed);
                }
            }
            FieldType::ColumnBreak | FieldType::TabBreak => {}
            _ => current.fields.push(field),
        }
    }
    if !current.fields.is_empty() {
        sections.push(current);
    }
    sections
}
