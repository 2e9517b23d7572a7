//! Expansion configuration.
//!
//! Settings come from dotted-key properties (a `tolbok.config` file or
//! equivalent) and are resolved into a [`Config`] *before* any handler
//! runs; handlers receive the resolved value explicitly and never consult
//! ambient state.

use crate::error::{Error, Result};
use std::path::Path;

/// Severity applied to the mere use of a trigger annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagUsage {
    #[default]
    Off,
    Warning,
    Error,
}

impl FlagUsage {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "OFF" => Ok(FlagUsage::Off),
            "WARNING" => Ok(FlagUsage::Warning),
            "ERROR" => Ok(FlagUsage::Error),
            other => Err(Error::config_error(format!(
                "invalid flag usage value '{}' (expected OFF, WARNING, or ERROR)",
                other
            ))),
        }
    }
}

/// Emit a warning or error whenever `@Getter` is used.
pub const GETTER_FLAG_USAGE: &str = "tolbok.getter.flagUsage";
/// Emit a warning or error whenever `@ThreadNamed` is used.
pub const THREAD_NAMED_FLAG_USAGE: &str = "tolbok.threadNamed.flagUsage";
/// Comma-separated field-name prefixes stripped before accessor naming.
pub const ACCESSORS_PREFIX: &str = "tolbok.accessors.prefix";

/// Resolved configuration passed into every expansion entry point.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub getter_flag_usage: FlagUsage,
    pub thread_named_flag_usage: FlagUsage,
    pub accessor_prefixes: Vec<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from dotted-key properties. Unknown keys are
    /// rejected so typos do not silently disable a flag.
    pub fn from_properties<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (key, value) in entries {
            match key.trim() {
                GETTER_FLAG_USAGE => config.getter_flag_usage = FlagUsage::parse(value)?,
                THREAD_NAMED_FLAG_USAGE => {
                    config.thread_named_flag_usage = FlagUsage::parse(value)?
                }
                ACCESSORS_PREFIX => {
                    config.accessor_prefixes = value
                        .split(',')
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(String::from)
                        .collect()
                }
                other => {
                    return Err(Error::config_error(format!(
                        "unknown configuration key '{}'",
                        other
                    )))
                }
            }
        }
        Ok(config)
    }

    /// Reads a `key = value` properties file; `#` starts a comment line.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut entries = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                Error::config_error(format!("malformed configuration line '{}'", line))
            })?;
            entries.push((key.trim(), value.trim()));
        }
        Self::from_properties(entries)
    }
}
