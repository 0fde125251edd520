//! # Inline parsing
//!
//! Cursor-based scan of a single line (paragraph or table cell text).
//!
//! At each position the constructs are tried in a fixed order and the
//! first that matches wins:
//!
//! 1. escape `\x`
//! 2. `@image[[..]]`, `@table[[..]]`, `@code[[..]]`
//! 3. citation `@[[..]]`
//! 4. bold `**..**`, then italic `*..*`
//! 5. code span `` `..` ``
//!
//! A construct that does not close is not a construct; its opening
//! delimiter stays part of the surrounding text. Text between constructs
//! becomes `InlineNode::Text`.
//!
//! ## Modules
//!
//! - **`types`**: `InlineNode`
//! - **`kinds`**: delimiter constants per construct
//! - **`cursor`**: `Cursor` with position tracking
//! - **`parser`**: `parse_inline()` and the `try_parse_*` helpers

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::parse_inline;
pub use types::InlineNode;
