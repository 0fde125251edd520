//! # Style configuration
//!
//! An ordered registry of style kinds. Each entry keeps the kind's default
//! record next to its effective record:
//!
//! 1. Built-in kinds are registered by [`StyleConfig::new`] with their
//!    built-in defaults ([`StyleKind::builtin_default`]).
//! 2. Extensions call [`StyleConfig::register`] before parsing to add
//!    their own kinds, so front matter can override them too.
//! 3. [`StyleConfig::apply_yaml`] replaces the effective record of every
//!    known kind named in a YAML mapping, then merges it with the kind's
//!    default. Unknown keys are skipped.
//!
//! After any of these steps every effective record has every field its
//! default sets, so renderers never deal with defaulting themselves.

mod kind;
mod record;

pub use kind::StyleKind;
pub use record::{
    Alignment, BlockAlignment, BorderCollapse, BorderStyle, DisplayMode, LineSpacing, StyleRecord,
};

use log::{debug, warn};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("style overrides are not valid YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),

    #[error("style overrides must be a mapping of style kinds, found {found}")]
    NotAMapping { found: &'static str },

    #[error("invalid style for `{kind}`: {source}")]
    InvalidRecord {
        kind: String,
        source: serde_yaml::Error,
    },

    #[error("style kind `{0}` is already registered")]
    DuplicateKind(String),
}

/// One registered kind with its default and effective records.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleEntry {
    kind: StyleKind,
    default: StyleRecord,
    record: StyleRecord,
}

impl StyleEntry {
    pub fn kind(&self) -> &StyleKind {
        &self.kind
    }

    /// The effective (merged) record.
    pub fn record(&self) -> &StyleRecord {
        &self.record
    }

    pub fn default_record(&self) -> &StyleRecord {
        &self.default
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    entries: Vec<StyleEntry>,
}

impl StyleConfig {
    /// All built-in kinds with their defaults, already merged.
    pub fn new() -> Self {
        let entries = StyleKind::BUILTIN
            .into_iter()
            .filter_map(|kind| {
                let default = kind.builtin_default()?;
                Some(StyleEntry {
                    kind,
                    record: default.clone(),
                    default,
                })
            })
            .collect();
        let mut config = Self { entries };
        config.merge();
        config
    }

    /// Adds a kind with its default record. The effective record starts as
    /// a copy of the default.
    pub fn register(&mut self, kind: StyleKind, default: StyleRecord) -> Result<(), StyleError> {
        if self.contains(&kind) {
            return Err(StyleError::DuplicateKind(kind.key().to_string()));
        }
        debug!("registered style kind `{kind}`");
        self.entries.push(StyleEntry {
            kind,
            record: default.clone(),
            default,
        });
        Ok(())
    }

    pub fn contains(&self, kind: &StyleKind) -> bool {
        self.entries.iter().any(|e| &e.kind == kind)
    }

    pub fn get(&self, kind: &StyleKind) -> Option<&StyleRecord> {
        self.entries
            .iter()
            .find(|e| &e.kind == kind)
            .map(|e| &e.record)
    }

    /// Replaces the effective record of `kind` with `record` merged over the
    /// kind's default. Returns `false` when the kind is not registered.
    pub fn set(&mut self, kind: &StyleKind, record: StyleRecord) -> bool {
        match self.entries.iter_mut().find(|e| &e.kind == kind) {
            Some(entry) => {
                entry.record = record.merged(&entry.default);
                true
            }
            None => false,
        }
    }

    /// Fills every unset field of every effective record from its default.
    pub fn merge(&mut self) {
        for entry in &mut self.entries {
            entry.record.merge_from(&entry.default);
        }
    }

    /// Applies a YAML mapping of `kind key -> partial record`.
    ///
    /// Returns the kinds that were overridden, in document order. An empty
    /// document is accepted and changes nothing.
    pub fn apply_yaml(&mut self, source: &str) -> Result<Vec<StyleKind>, StyleError> {
        let value: Value = serde_yaml::from_str(source).map_err(StyleError::Yaml)?;
        let mapping = match value {
            Value::Null => return Ok(Vec::new()),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(StyleError::NotAMapping {
                    found: value_kind(&other),
                });
            }
        };
        self.apply_mapping(mapping)
    }

    fn apply_mapping(&mut self, mapping: Mapping) -> Result<Vec<StyleKind>, StyleError> {
        let mut applied = Vec::new();
        for (key, fields) in mapping {
            let Some(key) = key.as_str() else {
                warn!("ignoring non-string style key {key:?}");
                continue;
            };
            let Some(entry) = self.entries.iter_mut().find(|e| e.kind.key() == key) else {
                warn!("ignoring unknown style kind `{key}`");
                continue;
            };
            let record: StyleRecord = if fields.is_null() {
                StyleRecord::default()
            } else {
                serde_yaml::from_value(fields).map_err(|source| StyleError::InvalidRecord {
                    kind: key.to_string(),
                    source,
                })?
            };
            entry.record = record.merged(&entry.default);
            debug!("applied style override for `{key}`");
            applied.push(entry.kind.clone());
        }
        Ok(applied)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes every effective record, in registration order, in the
    /// same shape [`StyleConfig::apply_yaml`] accepts.
    pub fn to_yaml(&self) -> Result<String, StyleError> {
        let mut mapping = Mapping::new();
        for entry in &self.entries {
            let record = serde_yaml::to_value(&entry.record).map_err(|source| {
                StyleError::InvalidRecord {
                    kind: entry.kind.key().to_string(),
                    source,
                }
            })?;
            mapping.insert(Value::String(entry.kind.key().to_string()), record);
        }
        serde_yaml::to_string(&mapping).map_err(StyleError::Yaml)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
