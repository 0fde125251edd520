//! # Inline kinds
//!
//! Each inline construct owns its delimiters. The parser refers to these
//! constants and never spells out `@[[` or `**` itself.
//!
//! - **`Escape`**: `\` followed by any character
//! - **`CrossRef`**: `@image[[`, `@table[[`, `@code[[`, `@[[`, closed by `]]`
//! - **`Emphasis`**: `**bold**` and `*italic*`
//! - **`CodeSpan`**: `` `code` ``

pub mod code_span;
pub mod cross_ref;
pub mod emphasis;
pub mod escape;

pub use code_span::CodeSpan;
pub use cross_ref::CrossRef;
pub use emphasis::Emphasis;
pub use escape::Escape;
