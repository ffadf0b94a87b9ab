//! Configuration loader
//!
//! `defaults/card-template.default.toml` is embedded into the library so that the shipped
//! message table and runtime behavior stay in sync. Applications layer their own files on top
//! of those defaults via [`Loader`] before deserializing into [`TemplateConfig`].
//!
//! The message table is the only localization surface of the crate: the diagnostic written in
//! place of an unknown field, and the sentences shown for templates that fail to parse.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/card-template.default.toml");

// The embedded defaults are covered by `loads_default_config` below.
static DEFAULT_CONFIG: Lazy<TemplateConfig> =
    Lazy::new(|| load_defaults().expect("embedded defaults to deserialize"));

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    pub messages: Messages,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

/// User-facing strings with `{placeholder}` slots.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Messages {
    /// `{field}`
    pub unknown_field: String,
    /// `{rest}`
    pub no_closing_brackets: String,
    /// `{name}`
    pub conditional_not_closed: String,
    /// `{name}`
    pub conditional_not_open: String,
    /// `{expected}`, `{found}`
    pub wrong_conditional_closed: String,
}

impl Default for Messages {
    fn default() -> Self {
        DEFAULT_CONFIG.messages.clone()
    }
}

impl Messages {
    pub fn unknown_field(&self, field: &str) -> String {
        fill(&self.unknown_field, &[("field", field)])
    }

    pub fn no_closing_brackets(&self, rest: &str) -> String {
        fill(&self.no_closing_brackets, &[("rest", rest)])
    }

    pub fn conditional_not_closed(&self, name: &str) -> String {
        fill(&self.conditional_not_closed, &[("name", name)])
    }

    pub fn conditional_not_open(&self, name: &str) -> String {
        fill(&self.conditional_not_open, &[("name", name)])
    }

    pub fn wrong_conditional_closed(&self, expected: &str, found: &str) -> String {
        fill(
            &self.wrong_conditional_closed,
            &[("expected", expected), ("found", found)],
        )
    }
}

/// Substitute `{name}` slots in one pass. Braces that do not form a known slot are copied, and
/// substituted values are never rescanned.
fn fill(pattern: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let slot = after.find('}').and_then(|end| {
            values
                .iter()
                .find(|(name, _)| *name == &after[..end])
                .map(|(_, value)| (end, *value))
        });
        match slot {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `messages.unknown_field`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<TemplateConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TemplateConfig, ConfigError> {
    Loader::new().build()
}
