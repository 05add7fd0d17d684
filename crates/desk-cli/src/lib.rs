//! Desk CLI
//!
//! Library side of the `deskform` binary: configuration file, fixture
//! backend and the command implementations.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod commands;
pub mod config;
pub mod fixtures;

pub use config::{ClientConfig, ConfigError};
pub use fixtures::FixtureBackend;

use desk_form::FormContext;
use std::path::PathBuf;
use std::sync::Arc;

/// Form context over a fixture directory
#[must_use]
pub fn fixture_context(root: impl Into<PathBuf>, config: &ClientConfig) -> FormContext {
    FormContext::with_config(
        Arc::new(FixtureBackend::new(root)),
        &config.cache,
        config.form.clone(),
    )
}
