//! Desk Metadata Model
//!
//! The data a metadata-driven client interprets at runtime.
//!
//! # Core Concepts
//!
//! - [`DocType`]: remote definition of one document shape, with an ordered
//!   list of [`DocField`]s
//! - [`FieldType`]: closed enumeration of field kinds, including the
//!   layout markers (Section/Column/Tab Break) that never carry a value
//! - [`Document`]: one record, with a [`DocStatus`] and an open field map
//! - [`DocKey`]: `doctype:name` cache key
//!
//! # Example
//!
//! ```rust
//! use desk_meta::{DocField, DocType, FieldType};
//!
//! let doctype = DocType::new(
//!     "Item",
//!     vec![DocField::new("title", "Title", FieldType::Data).required()],
//! );
//! assert_eq!(doctype.value_fields().count(), 1);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod de;
mod doctype;
mod document;
mod error;
mod field;
pub mod value;

pub use doctype::{DocType, SortOrder};
pub use document::{DocKey, DocStatus, Document};
pub use error::MetaError;
pub use field::{DocField, FieldType, FieldValidation};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
