//! Desk Form
//!
//! Metadata-driven forms: everything a form shows and checks is derived at
//! runtime from a DocType descriptor.
//!
//! # Pipeline
//!
//! ```text
//! DocType ──► schema::ValidationSchema   (required, numeric, length, pattern rules)
//!         ──► defaults::initial_values   (document value, coerced default, zero value)
//!         ──► layout::group              (sections at Section Breaks)
//!         ──► visibility::is_visible     (hidden flag, eval:<field> conditions)
//!         ──► widget::render             (input kind per field type)
//! ```
//!
//! [`FormController`] ties these to the shared caches and owns the draft,
//! the field errors and the [`FormState`] of one form.
//!
//! # Example
//!
//! ```rust,ignore
//! use desk_form::{FormContext, FormController, FormMode};
//!
//! # async fn example(backend: std::sync::Arc<dyn desk_cache::Backend>) -> Result<(), desk_form::FormError> {
//! let ctx = FormContext::new(backend);
//! let mut form = FormController::open(ctx, "Todo", None, FormMode::Create).await?;
//! form.set_value("title", "Widget")?;
//! let saved = form.submit().await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod controller;
pub mod datetime;
pub mod defaults;
pub mod error;
pub mod layout;
pub mod link;
pub mod schema;
pub mod state;
pub mod visibility;
pub mod widget;

pub use config::FormConfig;
pub use controller::{FormContext, FormController, FormId, VisibleSection};
pub use error::{FieldErrors, FormError};
pub use layout::Section;
pub use link::{LinkOption, LinkOptions};
pub use schema::{FieldRule, RuleKind, ValidationSchema};
pub use state::{FormMode, FormState};
pub use visibility::Condition;
pub use widget::{Interpretation, RawInput, RenderedField, Widget};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
