//! # Block parsing
//!
//! Two-phase, single-pass block parsing.
//!
//! ## Parsing phases
//!
//! 1. **Line classification** (`classify`): each line is classified into a
//!    `LineClass` holding local facts (raw and trimmed text, and what the
//!    line would open in the normal state).
//!
//! 2. **Block construction** (`builder`): a `BlockBuilder` state machine
//!    (normal, front matter, fenced code, table) appends nodes to the
//!    `Document` as blocks open and close.
//!
//! ## Modules
//!
//! - **`kinds`**: block syntax with owned delimiters (headings, images,
//!   table rows, code fences, front matter)
//! - **`classify`**: `LineClassifier` produces `LineClass` for each line
//! - **`builder`**: `BlockBuilder` state machine
//!
//! ## Key invariants
//!
//! - Fenced code and front matter are raw zones: their lines are never
//!   classified as anything else until the closing line.
//! - A table closes on the first non-row line, which is then read again in
//!   the normal state.
//! - Paragraphs are one line each; there is no paragraph continuation.

pub mod builder;
pub mod classify;
pub mod kinds;

pub use builder::BlockBuilder;
pub use classify::{LineClass, LineClassifier, LineKind};
