//! # papermark-config
//!
//! Two kinds of configuration live here:
//!
//! - **Style configuration** ([`style`]): one [`StyleRecord`] per node kind,
//!   built from a kind-specific default, overridable from YAML (document
//!   front matter or a standalone style sheet) and re-merged so renderers
//!   always see a complete record.
//! - **Tool settings** ([`settings`]): the user-level TOML file read by the
//!   command-line front end.

pub mod settings;
pub mod style;

pub use settings::{ConfigError, Settings};
pub use style::{
    Alignment, BlockAlignment, BorderCollapse, BorderStyle, DisplayMode, LineSpacing, StyleConfig,
    StyleEntry, StyleError, StyleKind, StyleRecord,
};
