//! DocType and document builders

use desk_meta::{DocField, DocType, Document, FieldType, FieldValidation};

pub fn field(fieldname: &str, label: &str, fieldtype: FieldType) -> DocField {
    DocField::new(fieldname, label, fieldtype)
}

pub fn section(label: &str) -> DocField {
    DocField::new(format!("{}_section", label.to_lowercase().replace(' ', "_")), label, FieldType::SectionBreak)
}

pub fn column_break(fieldname: &str) -> DocField {
    DocField::new(fieldname, "", FieldType::ColumnBreak)
}

/// `Todo`: required `title` (Data) and `active` (Check, no default)
pub fn todo_doctype() -> DocType {
    DocType::new(
        "Todo",
        vec![
            field("title", "Title", FieldType::Data).required(),
            field("active", "Active", FieldType::Check),
        ],
    )
}

/// `Item`: two sections, a link, a select, a conditional field and an attachment
pub fn item_doctype() -> DocType {
    DocType::new(
        "Item",
        vec![
            field("item_code", "Item Code", FieldType::Data)
                .required()
                .with_validation(FieldValidation {
                    pattern: Some("[A-Z]+-[0-9]+".to_string()),
                    max_length: Some(20),
                    ..FieldValidation::default()
                }),
            field("item_name", "Item Name", FieldType::Data),
            column_break("col_1"),
            field("item_group", "Item Group", FieldType::Link).with_options("Item Group"),
            field("stock_uom", "Unit", FieldType::Select).with_options("Nos\nKg\nBox"),
            section("Inventory"),
            field("is_stock_item", "Maintain Stock", FieldType::Check).with_default("1"),
            field("opening_stock", "Opening Stock", FieldType::Float)
                .with_depends_on("eval:is_stock_item")
                .with_validation(FieldValidation {
                    min_value: Some(0.0),
                    ..FieldValidation::default()
                }),
            field("valuation_rate", "Valuation Rate", FieldType::Currency),
            section("Details"),
            field("image", "Image", FieldType::AttachImage),
            field("launched_on", "Launched On", FieldType::Date),
            field("internal_ref", "Internal Ref", FieldType::Data).hidden(),
            field("created_by", "Created By", FieldType::ReadOnly),
        ],
    )
    .submittable()
}

/// `Item Group` records usable as link targets
pub fn item_groups() -> Vec<Document> {
    ["Products", "Services", "Raw Material"]
        .into_iter()
        .map(|name| {
            Document::new("Item Group")
                .with_name(name)
                .with_field("title", format!("{name} group"))
        })
        .collect()
}
